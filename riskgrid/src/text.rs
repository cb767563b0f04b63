use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Number of whitespace-delimited words. Runs of whitespace count once.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let current_width = display_width(s);
    if current_width <= max_width {
        return s.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let ellipsis = "…";
    let target_width = max_width.saturating_sub(1);

    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str(ellipsis);
    result
}

/// Greedy word wrap. Words wider than `max_width` are broken by character.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();

    for input_line in s.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0;

        for word in input_line.split_whitespace() {
            let word_width = display_width(word);

            if word_width > max_width {
                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }
                let mut broken = wrap_chars(word, max_width);
                // The tail of a broken word keeps filling the next line.
                current_line = broken.pop().unwrap_or_default();
                current_width = display_width(&current_line);
                lines.extend(broken);
                continue;
            }

            let space_width = usize::from(!current_line.is_empty());

            if current_width + space_width + word_width > max_width {
                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }
                current_line.push_str(word);
                current_width = word_width;
            } else {
                if space_width == 1 {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                current_width += space_width + word_width;
            }
        }

        lines.push(current_line);
    }

    lines
}

pub fn wrap_chars(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);

        if ch_width == 0 {
            // Combining marks stay with their base character
            current_line.push(ch);
            continue;
        }

        if current_width + ch_width > max_width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        current_line.push(ch);
        current_width += ch_width;
    }

    lines.push(current_line);
    lines
}
