//! Printers: colored text, markdown (termimad), and HTML fragment conversion.
//!
//! The completion endpoint returns HTML. Nothing here interprets it as live
//! markup: a small tag vocabulary is translated to markdown and every other
//! tag is dropped, so terminal rendering sanitises by construction.

use owo_colors::OwoColorize;
use termimad::MadSkin;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        if let Some(c) = self.color {
            match c {
                "green" => println!("{}", text.green()),
                "cyan" => println!("{}", text.cyan()),
                "magenta" => println!("{}", text.magenta()),
                "yellow" => println!("{}", text.yellow()),
                _ => println!("{}", text),
            }
        } else {
            println!("{}", text);
        }
    }
}

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) {
        self.skin.print_text(text);
        println!();
    }
}

/// Translate the HTML fragments the herbalist prompts elicit into markdown.
///
/// Handled tags: b/strong, i/em, h1..h4, p, br, ul/ol/li. Unknown tags are
/// stripped, a handful of common entities are decoded.
pub fn html_to_markdown(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        push_decoded(&mut out, &rest[..lt]);
        let Some(gt_rel) = rest[lt..].find('>') else {
            // Unterminated tag, keep the remainder as text
            push_decoded(&mut out, &rest[lt..]);
            rest = "";
            break;
        };
        let tag = &rest[lt + 1..lt + gt_rel];
        push_tag(&mut out, tag);
        rest = &rest[lt + gt_rel + 1..];
    }
    push_decoded(&mut out, rest);

    collapse_blank_lines(out.trim())
}

fn push_tag(out: &mut String, tag: &str) {
    let name = tag
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let closing = tag.starts_with('/');

    match name.as_str() {
        "b" | "strong" => out.push_str("**"),
        "i" | "em" => out.push('*'),
        "h1" | "h2" | "h3" | "h4" => {
            if closing {
                out.push('\n');
            } else {
                let level = name[1..].parse::<usize>().unwrap_or(2);
                out.push('\n');
                out.push_str(&"#".repeat(level));
                out.push(' ');
            }
        }
        "p" | "ul" | "ol" | "div" => out.push('\n'),
        "br" => out.push('\n'),
        "li" => {
            if !closing {
                out.push_str("\n- ");
            }
        }
        _ => {}
    }
}

fn push_decoded(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let mut replaced = false;
        for (entity, ch) in [
            ("&amp;", "&"),
            ("&lt;", "<"),
            ("&gt;", ">"),
            ("&quot;", "\""),
            ("&#39;", "'"),
            ("&nbsp;", " "),
        ] {
            if tail.starts_with(entity) {
                out.push_str(ch);
                rest = &tail[entity.len()..];
                replaced = true;
                break;
            }
        }
        if !replaced {
            out.push('&');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_emphasis_become_markdown() {
        assert_eq!(html_to_markdown("<b>Tulsi</b> is <i>holy</i>"), "**Tulsi** is *holy*");
        assert_eq!(html_to_markdown("<strong>USES:</strong>"), "**USES:**");
    }

    #[test]
    fn lists_and_headings_translate() {
        let html = "<h2>AYURVEDIC USES:</h2><ul><li>Tea</li><li>Paste</li></ul>";
        assert_eq!(html_to_markdown(html), "## AYURVEDIC USES:\n\n- Tea\n- Paste");
    }

    #[test]
    fn unknown_tags_are_stripped_not_rendered() {
        assert_eq!(
            html_to_markdown(r#"<script src="x">alert(1)</script> leaf"#),
            "alert(1) leaf"
        );
        assert_eq!(html_to_markdown("<span class=\"x\">leaf</span>"), "leaf");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(html_to_markdown("Neem &amp; Tulsi &lt;fresh&gt;"), "Neem & Tulsi <fresh>");
        assert_eq!(html_to_markdown("it&#39;s&nbsp;warm"), "it's warm");
    }

    #[test]
    fn unterminated_tag_is_kept_as_text() {
        assert_eq!(html_to_markdown("a <b incomplete"), "a <b incomplete");
    }

    #[test]
    fn blank_runs_collapse() {
        let html = "<p>one</p><p></p><p>two</p>";
        assert_eq!(html_to_markdown(html), "one\n\ntwo");
    }
}
