//! Static configuration data consumed by the engine: the type chart and the
//! built-in move table.

pub mod moves;
pub mod types;

/// Normalizes a display name ("Never-Melt Ice", "U-turn") into a lookup id.
pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
