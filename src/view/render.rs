//! Splits message content on fenced code blocks for rendering.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Code(String),
}

const FENCE: &str = "```";

/// Splits content into alternating plain and code segments on paired
/// triple-backtick fences. A single leading newline inside a fence is
/// dropped. An unterminated trailing fence is left as plain text, fence
/// characters included. Empty plain segments are omitted.
pub fn split_fenced(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(close) = after_open.find(FENCE) else {
            break;
        };

        if open > 0 {
            segments.push(Segment::Text(rest[..open].to_string()));
        }

        let code = &after_open[..close];
        let code = code.strip_prefix('\n').unwrap_or(code);
        segments.push(Segment::Code(code.to_string()));

        rest = &after_open[close + FENCE.len()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest.to_string()));
    }

    segments
}

/// Renders content for the terminal: plain segments inline, code segments
/// as indented blocks on their own lines.
pub fn render_content(content: &str) -> String {
    let mut out = String::new();

    for segment in split_fenced(content) {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Code(code) => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                for line in code.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }

    out
}
