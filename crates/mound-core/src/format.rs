// Display helpers shared by the catalog, the loader and the card widgets.

use crate::dataset::Hand;

/// Turn a "Last, First" dataset name into "First Last". Names without a
/// comma are returned unchanged.
pub fn format_player_name(name: &str) -> String {
    if !name.contains(',') {
        return name.to_string();
    }
    name.split(',')
        .map(str::trim)
        .rev()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean of the valid arm angles, formatted to one decimal. `"0.0"` when no
/// angle is usable.
pub fn average_arm_angle<I>(angles: I) -> String
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = angles
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", sum / count as f64)
}

/// File-name-safe form of a player name used in heatmap paths: whitespace
/// runs become a single underscore, then commas are removed.
pub fn sanitize_heatmap_name(name: &str) -> String {
    let mut collapsed = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push('_');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }
    collapsed.replace(',', "")
}

/// Break values (inches) with one decimal place.
pub fn format_break(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

/// Spin rate rounded to whole rpm with thousands separators ("2,345").
pub fn format_spin(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let rounded = v.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Pre-formatted dataset strings (velocity range, usage, zone rate).
pub fn format_display(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Card header badge, e.g. "RHP • 41.3° slot".
pub fn hand_slot_label(hand: Hand, arm_angle: &str) -> String {
    format!("{hand}HP • {arm_angle}° slot")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
