//! Light markup in generated stories.
//!
//! Models often answer with Markdown: paragraphs, *emphasis*, **strong**
//! text and the odd heading. [`parse_story`] turns that into lines of styled
//! runs a front end can draw without knowing Markdown.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Inline style of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub heading: bool,
}

/// A piece of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

/// One output line. An empty line separates blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupLine {
    pub runs: Vec<Run>,
}

impl MarkupLine {
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<MarkupLine>,
    current: MarkupLine,
    emphasis: usize,
    strong: usize,
    heading: bool,
}

impl LineBuilder {
    fn style(&self) -> RunStyle {
        RunStyle {
            emphasis: self.emphasis > 0,
            strong: self.strong > 0,
            heading: self.heading,
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        match self.current.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.runs.push(Run {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    fn end_block(&mut self) {
        if !self.current.runs.is_empty() {
            self.break_line();
        }
        if self.lines.last().is_some_and(|l| !l.is_blank()) {
            self.lines.push(MarkupLine::default());
        }
    }

    fn finish(mut self) -> Vec<MarkupLine> {
        if !self.current.runs.is_empty() {
            self.break_line();
        }
        while self.lines.last().is_some_and(MarkupLine::is_blank) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Parse story text into styled lines.
///
/// Soft line breaks become spaces; hard breaks and block ends start a new
/// line. Consecutive blocks are separated by exactly one blank line.
pub fn parse_story(source: &str) -> Vec<MarkupLine> {
    let mut builder = LineBuilder::default();

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Emphasis) => builder.emphasis += 1,
            Event::End(TagEnd::Emphasis) => builder.emphasis = builder.emphasis.saturating_sub(1),
            Event::Start(Tag::Strong) => builder.strong += 1,
            Event::End(TagEnd::Strong) => builder.strong = builder.strong.saturating_sub(1),
            Event::Start(Tag::Heading { .. }) => builder.heading = true,
            Event::End(TagEnd::Heading(_)) => {
                builder.heading = false;
                builder.end_block();
            }
            Event::Start(Tag::Item) => builder.push_text("• "),
            Event::End(TagEnd::Item) => builder.break_line(),
            Event::End(TagEnd::Paragraph | TagEnd::BlockQuote(_) | TagEnd::List(_)) => {
                builder.end_block()
            }
            Event::End(TagEnd::CodeBlock) => builder.end_block(),
            Event::Text(text) | Event::Code(text) => builder.push_text(&text),
            Event::Html(html) | Event::InlineHtml(html) => builder.push_text(&html),
            Event::SoftBreak => builder.push_text(" "),
            Event::HardBreak => builder.break_line(),
            Event::Rule => {
                builder.push_text("* * *");
                builder.end_block();
            }
            _ => {}
        }
    }

    builder.finish()
}

/// Story text with the markup stripped, one line per output line.
pub fn to_plain_text(source: &str) -> String {
    parse_story(source)
        .iter()
        .map(MarkupLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        parse_story(source).iter().map(MarkupLine::text).collect()
    }

    #[test]
    fn test_paragraphs_separated_by_one_blank() {
        assert_eq!(
            texts("First line\nstill first.\n\n\n\nSecond."),
            vec!["First line still first.", "", "Second."]
        );
    }

    #[test]
    fn test_inline_styles() {
        let lines = parse_story("A *quiet* and **bold** ***both***.");
        assert_eq!(lines.len(), 1);
        let runs = &lines[0].runs;

        let quiet = runs.iter().find(|r| r.text == "quiet").unwrap();
        assert!(quiet.style.emphasis && !quiet.style.strong);

        let bold = runs.iter().find(|r| r.text == "bold").unwrap();
        assert!(bold.style.strong && !bold.style.emphasis);

        let both = runs.iter().find(|r| r.text == "both").unwrap();
        assert!(both.style.strong && both.style.emphasis);

        assert_eq!(lines[0].text(), "A quiet and bold both.");
    }

    #[test]
    fn test_heading() {
        let lines = parse_story("# The Crypt\n\nIt was cold.");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].runs.iter().all(|r| r.style.heading));
        assert_eq!(lines[0].text(), "The Crypt");
        assert!(lines[1].is_blank());
        assert!(!lines[2].runs[0].style.heading);
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(texts("one  \ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            to_plain_text("*Night* fell.\n\nThe **end**."),
            "Night fell.\n\nThe end."
        );
        assert_eq!(to_plain_text(""), "");
    }
}
