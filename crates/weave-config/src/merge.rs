//! Deep-merge for layered TOML overlays.
//!
//! Grounded on the teacher's `deep_merge` algorithm: tables merge
//! recursively per-field, scalars and arrays from the overlay replace the
//! base value. This crate's merge has no restriction-enforcement layer —
//! unlike the teacher's workspace-vs-user tightening rules, every layer here
//! is equally trusted (defaults, system, user, workspace, env), so a plain
//! last-writer-wins merge is sufficient.

/// Recursively deep-merge `overlay` into `base`.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_scalar_replaces_base_scalar() {
        let mut base: toml::Value = toml::from_str("[l3]\nmax_iterations = 25\n").unwrap();
        let overlay: toml::Value = toml::from_str("[l3]\nmax_iterations = 10\n").unwrap();
        deep_merge(&mut base, &overlay);
        assert_eq!(base["l3"]["max_iterations"].as_integer(), Some(10));
    }

    #[test]
    fn overlay_leaves_sibling_fields_from_base_untouched() {
        let mut base: toml::Value =
            toml::from_str("[l3]\nmax_iterations = 25\ntimeout_seconds = 300\n").unwrap();
        let overlay: toml::Value = toml::from_str("[l3]\nmax_iterations = 10\n").unwrap();
        deep_merge(&mut base, &overlay);
        assert_eq!(base["l3"]["timeout_seconds"].as_integer(), Some(300));
    }
}
