/// Route colors, all shades of pink so they read well over dark tiles
pub const PINK_PALETTE: [&str; 7] = [
    "#FFC0CB", "#FFB6C1", "#FF69B4", "#FF1493", "#F48FB1", "#F06292", "#F8BBD0",
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Palette color for a route. Stable across runs and builds.
#[allow(clippy::cast_possible_truncation)]
pub fn route_color(route_name: &str) -> &'static str {
    let hash = fnv1a(route_name.as_bytes());
    PINK_PALETTE[(hash % PINK_PALETTE.len() as u64) as usize]
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}
