#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Columns never shrink below this many characters.
const MIN_COLUMN_WIDTH: usize = 6;

/// Render an aligned plain-text table.
///
/// Widths are measured in characters. When `max_width` is set the widest
/// columns give up space first; cells that still do not fit are elided with
/// `…`, at the front for paths so the file name stays visible.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| char_len(cell))
                .max()
                .unwrap_or(0)
                .max(char_len(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&elide(header, *width), *width, false, None))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2));

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = elide(value, *width);
                let color = if options.color { status_color(&text) } else { None };
                pad(&text, *width, looks_numeric(&text), color)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > char_len(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn elide(value: &str, width: usize) -> String {
    let len = char_len(value);
    if len <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let keep = width - 1;
    if value.contains('/') || value.contains('\\') {
        let tail: String = value.chars().skip(len - keep).collect();
        format!("…{tail}")
    } else {
        let head: String = value.chars().take(keep).collect();
        format!("{head}…")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool, color: Option<&str>) -> String {
    let fill = " ".repeat(width.saturating_sub(char_len(value)));
    let text = color.map_or_else(
        || value.to_string(),
        |code| format!("\u{1b}[{code}m{value}\u{1b}[0m"),
    );
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn status_color(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "ok" | "true" | "available" => Some("32"),
        "partial" | "warn" | "skipped" => Some("33"),
        "failed" | "false" | "missing" | "error" => Some("31"),
        _ => None,
    }
}
