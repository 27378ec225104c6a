use crate::constants::DATA_URL_PREFIX;

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

pub fn format_money(amount: u64) -> String {
    format!("₱{:.2}", amount as f64)
}

pub fn pad_cell(value: &str, width: usize) -> String {
    let shown = truncate_label(value, width);
    let pad = width.saturating_sub(shown.chars().count());
    format!("{}{}", shown, " ".repeat(pad))
}

pub fn image_label(img: &str) -> &str {
    if img.starts_with(DATA_URL_PREFIX) {
        "[uploaded image]"
    } else {
        img
    }
}

pub fn mask_secret(value: &str) -> String {
    "*".repeat(value.chars().count())
}

pub fn virtual_midpoints(inner_top: u16, scroll: usize, count: usize) -> Vec<u16> {
    (0..count)
        .map(|i| {
            let y = inner_top as isize + i as isize - scroll as isize + 1;
            y.clamp(0, u16::MAX as isize) as u16
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_prev_index_wraps_to_end() {
        assert_eq!(wrap_prev_index(0, 5), 4);
        assert_eq!(wrap_prev_index(3, 5), 2);
        assert_eq!(wrap_prev_index(0, 0), 0);
    }

    #[test]
    fn test_wrap_next_index_wraps_to_start() {
        assert_eq!(wrap_next_index(4, 5), 0);
        assert_eq!(wrap_next_index(1, 5), 2);
        assert_eq!(wrap_next_index(0, 0), 0);
    }

    #[test]
    fn test_truncate_label_adds_ellipsis() {
        assert_eq!(truncate_label("Wedding Premium", 10), "Wedding...");
        assert_eq!(truncate_label("Basic", 10), "Basic");
        assert_eq!(truncate_label("Basic", 3), "Bas");
    }

    #[test]
    fn test_format_money_shows_centavos() {
        assert_eq!(format_money(15000), "₱15000.00");
        assert_eq!(format_money(0), "₱0.00");
    }

    #[test]
    fn test_pad_cell_fixes_the_width() {
        assert_eq!(pad_cell("BASIC", 8), "BASIC   ");
        assert_eq!(pad_cell("WEDDING PREMIUM", 8), "WEDDI...");
    }

    #[test]
    fn test_image_label_tags_data_urls() {
        assert_eq!(
            image_label("data:image/png;base64,AAAA"),
            "[uploaded image]"
        );
        assert_eq!(
            image_label("images/packagelist/regular.jpg"),
            "images/packagelist/regular.jpg"
        );
    }

    #[test]
    fn test_mask_secret_counts_chars() {
        assert_eq!(mask_secret("admin123"), "********");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_virtual_midpoints_follow_the_scroll() {
        assert_eq!(virtual_midpoints(5, 0, 3), vec![6, 7, 8]);
        assert_eq!(virtual_midpoints(5, 2, 4), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_virtual_midpoints_clamp_above_the_window() {
        let midpoints = virtual_midpoints(1, 4, 5);
        assert_eq!(midpoints[0], 0);
        assert_eq!(midpoints[4], 2);
    }
}
