//! Rendering
//!
//!     A [RenderPolicy] picks a view (everything, the original, or the edited document) and a mode
//!     (raw text, or text wrapped in semantic markers). Rendering a segment is a pure function of the
//!     segment and the policy:
//!
//!         | Segment      | OriginalOnly    | EditedOnly    | ShowAll                          |
//!         |--------------|-----------------|---------------|----------------------------------|
//!         | Literal      | text            | text          | text                             |
//!         | Addition     |                 | content [ins] | content [ins]                    |
//!         | Deletion     | content [del]   |               | content [del]                    |
//!         | Substitution | original [del]  | edited [ins]  | original [del] + edited [ins]    |
//!         | Comment      |                 |               | content [comment] (tagged only)  |
//!         | Highlight    | content [mark]  | content [mark]| content [mark] + trailing comment|
//!
//!     Markers are only written in tagged mode. A comment has no textual presence in any
//!     reconstruction, so in raw mode it always renders to nothing.
//!
//! Markers
//!
//!     The renderer only knows abstract [Marker]s. A [MarkerSyntax] binds them to concrete open and
//!     close strings. [BracketSyntax] is the neutral binding shipped here; the HTML binding lives
//!     with the HTML tooling in critic-babel.

use crate::critic::segment::Segment;
use serde::Deserialize;

/// Which reading of the document to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum View {
    #[default]
    #[serde(rename = "all")]
    ShowAll,
    #[serde(rename = "original")]
    OriginalOnly,
    #[serde(rename = "edited")]
    EditedOnly,
}

impl View {
    fn shows_original(self) -> bool {
        matches!(self, View::ShowAll | View::OriginalOnly)
    }

    fn shows_edited(self) -> bool {
        matches!(self, View::ShowAll | View::EditedOnly)
    }
}

/// Whether annotated text is wrapped in markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Raw,
    #[default]
    Tagged,
}

/// View and mode, chosen once per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RenderPolicy {
    pub view: View,
    pub mode: Mode,
}

impl RenderPolicy {
    pub fn new(view: View, mode: Mode) -> Self {
        Self { view, mode }
    }

    /// ShowAll in raw mode mixes both readings with nothing to tell them apart.
    ///
    /// It still renders (both sides, untagged) but has no agreed plain text meaning.
    pub fn is_ill_defined(&self) -> bool {
        self.view == View::ShowAll && self.mode == Mode::Raw
    }
}

/// Semantic marker wrapped around annotated content in tagged mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Insertion,
    Deletion,
    Comment,
    Highlight,
}

/// Binds abstract markers to the strings written around content.
pub trait MarkerSyntax {
    fn open(&self, marker: Marker) -> &str;
    fn close(&self, marker: Marker) -> &str;
}

/// `[ins]...[/ins]` style markers
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketSyntax;

impl MarkerSyntax for BracketSyntax {
    fn open(&self, marker: Marker) -> &str {
        match marker {
            Marker::Insertion => "[ins]",
            Marker::Deletion => "[del]",
            Marker::Comment => "[comment]",
            Marker::Highlight => "[mark]",
        }
    }

    fn close(&self, marker: Marker) -> &str {
        match marker {
            Marker::Insertion => "[/ins]",
            Marker::Deletion => "[/del]",
            Marker::Comment => "[/comment]",
            Marker::Highlight => "[/mark]",
        }
    }
}

/// Applies a policy to segments using a marker syntax.
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    policy: RenderPolicy,
    syntax: &'a dyn MarkerSyntax,
}

impl<'a> Renderer<'a> {
    pub fn new(policy: RenderPolicy, syntax: &'a dyn MarkerSyntax) -> Self {
        Self { policy, syntax }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Append the rendering of `segment` to `out`. Appends nothing for hidden segments.
    pub fn render(&self, segment: &Segment, out: &mut Vec<u8>) {
        let view = self.policy.view;
        match segment {
            Segment::Literal { text } => out.extend_from_slice(text),
            Segment::Addition { content } => {
                if view.shows_edited() {
                    self.wrap(Marker::Insertion, content, out);
                }
            }
            Segment::Deletion { content } => {
                if view.shows_original() {
                    self.wrap(Marker::Deletion, content, out);
                }
            }
            Segment::Substitution {
                original_text,
                edited_text,
            } => {
                if view.shows_original() {
                    self.wrap(Marker::Deletion, original_text, out);
                }
                if view.shows_edited() {
                    self.wrap(Marker::Insertion, edited_text, out);
                }
            }
            Segment::Comment { content } => self.comment(content, out),
            Segment::Highlight {
                content,
                trailing_comment,
            } => {
                self.wrap(Marker::Highlight, content, out);
                if let Some(comment) = trailing_comment {
                    self.comment(&comment.content, out);
                }
            }
        }
    }

    pub fn render_to_vec(&self, segment: &Segment) -> Vec<u8> {
        let mut out = Vec::new();
        self.render(segment, &mut out);
        out
    }

    fn comment(&self, content: &[u8], out: &mut Vec<u8>) {
        if self.policy.view == View::ShowAll && self.policy.mode == Mode::Tagged {
            self.wrap(Marker::Comment, content, out);
        }
    }

    fn wrap(&self, marker: Marker, content: &[u8], out: &mut Vec<u8>) {
        match self.policy.mode {
            Mode::Raw => out.extend_from_slice(content),
            Mode::Tagged => {
                out.extend_from_slice(self.syntax.open(marker).as_bytes());
                out.extend_from_slice(content);
                out.extend_from_slice(self.syntax.close(marker).as_bytes());
            }
        }
    }
}

/// Render one segment with bracket markers.
pub fn render(segment: &Segment, policy: &RenderPolicy) -> Vec<u8> {
    Renderer::new(*policy, &BracketSyntax).render_to_vec(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critic::segment::Comment;
    use rstest::rstest;

    fn addition() -> Segment {
        Segment::Addition {
            content: "new".into(),
        }
    }

    fn deletion() -> Segment {
        Segment::Deletion {
            content: "old".into(),
        }
    }

    fn substitution() -> Segment {
        Segment::Substitution {
            original_text: "teh".into(),
            edited_text: "the".into(),
        }
    }

    fn comment() -> Segment {
        Segment::Comment {
            content: "note".into(),
        }
    }

    fn highlight() -> Segment {
        Segment::Highlight {
            content: "key".into(),
            trailing_comment: Some(Comment {
                content: "why".into(),
            }),
        }
    }

    #[rstest]
    #[case(addition(), View::OriginalOnly, Mode::Tagged, "")]
    #[case(addition(), View::EditedOnly, Mode::Tagged, "[ins]new[/ins]")]
    #[case(addition(), View::ShowAll, Mode::Tagged, "[ins]new[/ins]")]
    #[case(addition(), View::EditedOnly, Mode::Raw, "new")]
    #[case(deletion(), View::OriginalOnly, Mode::Tagged, "[del]old[/del]")]
    #[case(deletion(), View::EditedOnly, Mode::Tagged, "")]
    #[case(deletion(), View::ShowAll, Mode::Tagged, "[del]old[/del]")]
    #[case(deletion(), View::OriginalOnly, Mode::Raw, "old")]
    #[case(substitution(), View::OriginalOnly, Mode::Tagged, "[del]teh[/del]")]
    #[case(substitution(), View::EditedOnly, Mode::Tagged, "[ins]the[/ins]")]
    #[case(substitution(), View::ShowAll, Mode::Tagged, "[del]teh[/del][ins]the[/ins]")]
    #[case(substitution(), View::OriginalOnly, Mode::Raw, "teh")]
    #[case(substitution(), View::EditedOnly, Mode::Raw, "the")]
    #[case(substitution(), View::ShowAll, Mode::Raw, "tehthe")]
    #[case(comment(), View::OriginalOnly, Mode::Tagged, "")]
    #[case(comment(), View::EditedOnly, Mode::Tagged, "")]
    #[case(comment(), View::ShowAll, Mode::Tagged, "[comment]note[/comment]")]
    #[case(comment(), View::ShowAll, Mode::Raw, "")]
    #[case(highlight(), View::OriginalOnly, Mode::Tagged, "[mark]key[/mark]")]
    #[case(highlight(), View::EditedOnly, Mode::Raw, "key")]
    #[case(
        highlight(),
        View::ShowAll,
        Mode::Tagged,
        "[mark]key[/mark][comment]why[/comment]"
    )]
    #[case(highlight(), View::ShowAll, Mode::Raw, "key")]
    fn decision_table(
        #[case] segment: Segment,
        #[case] view: View,
        #[case] mode: Mode,
        #[case] expected: &str,
    ) {
        assert_eq!(
            render(&segment, &RenderPolicy::new(view, mode)),
            expected.as_bytes()
        );
    }

    #[rstest]
    fn literals_pass_through(
        #[values(View::ShowAll, View::OriginalOnly, View::EditedOnly)] view: View,
        #[values(Mode::Raw, Mode::Tagged)] mode: Mode,
    ) {
        let segment = Segment::literal("plain {text}");
        assert_eq!(
            render(&segment, &RenderPolicy::new(view, mode)),
            b"plain {text}"
        );
    }

    #[test]
    fn only_show_all_raw_is_ill_defined() {
        assert!(RenderPolicy::new(View::ShowAll, Mode::Raw).is_ill_defined());
        assert!(!RenderPolicy::new(View::ShowAll, Mode::Tagged).is_ill_defined());
        assert!(!RenderPolicy::new(View::EditedOnly, Mode::Raw).is_ill_defined());
    }

    #[test]
    fn custom_syntax_is_used_for_markers() {
        struct Angle;
        impl MarkerSyntax for Angle {
            fn open(&self, _: Marker) -> &str {
                "<"
            }
            fn close(&self, _: Marker) -> &str {
                ">"
            }
        }
        let renderer = Renderer::new(RenderPolicy::default(), &Angle);
        assert_eq!(renderer.render_to_vec(&substitution()), b"<teh><the>");
    }

    #[test]
    fn policy_names_deserialize() {
        let policy: RenderPolicy =
            serde_json::from_str(r#"{"view": "edited", "mode": "raw"}"#).unwrap();
        assert_eq!(policy, RenderPolicy::new(View::EditedOnly, Mode::Raw));
    }
}
