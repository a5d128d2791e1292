//! First-run seeding of the default station list.

use super::{NewStation, StationStore};
use crate::error::RadiodialResult;

/// Default stations as `(name, url, icon, country)`.
const DEFAULT_STATIONS: &[(&str, &str, &str, &str)] = &[
    ("RTL 102.5", "http://shoutcast.rtl.it:3010/stream/1/", "📻", "Italy"),
    ("RDS", "https://stream.rds.radio/audio/rds.stream_aac/playlist.m3u8", "🎵", "Italy"),
    ("Radio 105", "http://icecast.unitedradio.it/Radio105.mp3", "🤪", "Italy"),
    ("Radio Monte Carlo", "https://icy.unitedradio.it/RMC.mp3", "🍸", "Italy"),
    ("Radio Italia", "https://icy.unitedradio.it/RadioItalia.mp3", "🇮🇹", "Italy"),
    ("Radio 24", "https://shoutcast.radio24.it/radio24.mp3", "💼", "Italy"),
    ("Radio Kiss Kiss", "https://ice06.fluidstream.net/KissKiss.mp3", "💋", "Italy"),
    ("Radio Deejay", "https://streamcdnb3-4c4b867c89244861ac216426883d1ad0.msvdn.net/radiodeejay/radiodeejay/master_ma.m3u8", "🎧", "Italy"),
    ("Virgin Radio", "https://icecast.unitedradio.it/Virgin.mp3", "🤘", "Italy"),
    ("Radio Subasio", "https://icy.unitedradio.it/Subasio.mp3", "❤️", "Italy"),
    ("Los 40", "https://playerservices.streamtheworld.com/api/livestream-redirect/LOS40.mp3", "🔥", "Spain"),
    ("Cadena SER", "https://playerservices.streamtheworld.com/api/livestream-redirect/CADENASER.mp3", "📻", "Spain"),
    ("Onda Cero", "https://playerservices.streamtheworld.com/api/livestream-redirect/ONDACERO.mp3", "🟢", "Spain"),
    ("Cadena 100", "https://cadena100-cope-rrcast.flumotion.com/cope/cadena100.mp3", "💯", "Spain"),
    ("Europa FM", "https://Europa-adnstream1.nice264.com/Europa-adnstream1", "🇪🇺", "Spain"),
    ("Rock FM", "https://rockfm-cope-rrcast.flumotion.com/cope/rockfm.mp3", "🎸", "Spain"),
    ("Kiss FM", "https://kissfm.kissfmradio.cires21.com/kissfm.mp3", "💋", "Spain"),
    ("RNE Radio 1", "https://rtvelivestream.rtve.es/rne/rne_r1_main.m3u8", "📡", "Spain"),
    ("Dial España", "https://playerservices.streamtheworld.com/api/livestream-redirect/DIAL.mp3", "🎶", "Spain"),
    ("Jovem Pan", "https://r17.ciclano.io:15045/stream", "🎙️", "Brazil"),
    ("Band FM", "https://8923.brasilstream.com.br/stream", "🎵", "Brazil"),
    ("Antena 1", "https://antenaone.crossradio.com.br/stream/1;", "📻", "Brazil"),
    ("Mix FM", "https://playerservices.streamtheworld.com/api/livestream-redirect/RT_MIXFMAAC.aac", "🎶", "Brazil"),
    ("Alpha FM", "https://playerservices.streamtheworld.com/api/livestream-redirect/ALPHAFMAAC.aac", "🌟", "Brazil"),
    ("CBN", "https://27863.live.streamtheworld.com/CBN_SPAAC.aac", "📰", "Brazil"),
    ("Nativa FM", "https://24503.live.streamtheworld.com/NATIVA_FMAAC.aac", "🇧🇷", "Brazil"),
    ("89 FM", "https://stream.89fm.com.br:8000/radio89.mp3", "🎸", "Brazil"),
    ("Radio Globo", "https://noticias.radioglobo.com.br:8443/stream", "🌎", "Brazil"),
    ("Kiss FM", "https://8903.brasilstream.com.br/stream", "💋", "Brazil"),
    ("KTU 103.5", "https://stream.revma.ihrhls.com/zc5205", "💃", "USA"),
    ("Z100 NY", "https://stream.revma.ihrhls.com/zc181", "🔥", "USA"),
    ("Hot 97 NY", "https://stream.revma.ihrhls.com/zc5173", "🎤", "USA"),
    ("KEXP Seattle", "https://kexp-mp3-128.streamguys1.com/kexp128.mp3", "🎸", "USA"),
    ("WFMU Jersey", "https://stream0.wfmu.org/freeform-128k", "📻", "USA"),
    ("WNYC NY", "https://fm939.wnyc.org/wnycfm-web", "🗽", "USA"),
    ("KCRW LA", "https://kcrw.streamguys1.com/kcrw_192k_mp3_on_air", "🌴", "USA"),
    ("KUTX Austin", "https://streams.kut.org/4428_192.mp3", "🤠", "USA"),
    ("WXPN Philly", "https://xpnlive.streamguys1.com/xpnlive", "🎵", "USA"),
    ("WBGO Jazz", "https://wbgo.streamguys1.com/wbgo128", "🎷", "USA"),
    ("NPR News", "https://npr-ice.streamguys1.com/live.mp3", "🎙️", "USA"),
    ("SomaFM", "https://ice1.somafm.com/groovesalad-128-mp3", "🌊", "USA"),
    ("Radio Paradise", "https://stream.radioparadise.com/aac-128", "🎧", "USA"),
];

/// Returns the default station list as insert payloads.
#[must_use]
pub fn default_stations() -> Vec<NewStation> {
    DEFAULT_STATIONS
        .iter()
        .map(|&(name, url, icon, country)| NewStation {
            name: name.to_string(),
            url: url.to_string(),
            icon: Some(icon.to_string()),
            country: Some(country.to_string()),
        })
        .collect()
}

/// Populates the catalog with the default stations if it is empty.
///
/// Returns the number of stations inserted (0 when the catalog already had
/// stations).
pub fn seed_default_stations(store: &dyn StationStore) -> RadiodialResult<usize> {
    if store.count() > 0 {
        log::debug!("[Catalog] Catalog not empty, skipping seed");
        return Ok(0);
    }

    let stations = default_stations();
    let total = stations.len();
    for station in stations {
        store.create(station)?;
    }

    log::info!("[Catalog] Seeded {} default station(s)", total);
    Ok(total)
}
