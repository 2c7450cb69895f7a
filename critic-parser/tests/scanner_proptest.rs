//! Property-based tests for the scanner and the view renderer
//!
//! Arbitrary delimiter soup checks that scanning is lossless. Generated well-formed documents are
//! checked against a model of what the original and edited readings must be.

use critic_parser::critic::testing::source_slices;
use critic_parser::{
    render_str, scan_str, BracketSyntax, Mode, RenderPolicy, Scanner, Segment, View,
};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "{++", "++}", "{--", "--}", "{~~", "~~>", "~~}", "{>>", "<<}", "{==", "==}", "{", "}", "+",
    "-", "~", "<", ">", "=", "a", "bc", " ", "\n", "é", "~~~", "{{",
];

const POLICIES: [RenderPolicy; 6] = [
    RenderPolicy {
        view: View::ShowAll,
        mode: Mode::Tagged,
    },
    RenderPolicy {
        view: View::ShowAll,
        mode: Mode::Raw,
    },
    RenderPolicy {
        view: View::OriginalOnly,
        mode: Mode::Tagged,
    },
    RenderPolicy {
        view: View::OriginalOnly,
        mode: Mode::Raw,
    },
    RenderPolicy {
        view: View::EditedOnly,
        mode: Mode::Tagged,
    },
    RenderPolicy {
        view: View::EditedOnly,
        mode: Mode::Raw,
    },
];

fn delimiter_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..48).prop_map(|parts| parts.concat())
}

/// One piece of a well-formed document: its markup, original side and edited side.
#[derive(Debug, Clone)]
struct Piece {
    markup: String,
    original: String,
    edited: String,
}

/// Literal text that cannot start a delimiter.
fn word() -> impl Strategy<Value = String> {
    "[a-y ]{0,8}"
}

/// Span content full of delimiter characters, minus the sequences that would end it early.
fn body(stops: &'static [&'static str]) -> impl Strategy<Value = String> {
    "[a-c{}+~<>= -]{0,10}".prop_filter("body must not end its span", move |text| {
        !stops.iter().any(|stop| text.contains(stop))
    })
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        word().prop_map(|w| Piece {
            markup: w.clone(),
            original: w.clone(),
            edited: w,
        }),
        body(&["++}"]).prop_map(|b| Piece {
            markup: format!("{{++{}++}}", b),
            original: String::new(),
            edited: b,
        }),
        body(&["--}"]).prop_map(|b| Piece {
            markup: format!("{{--{}--}}", b),
            original: b,
            edited: String::new(),
        }),
        (body(&["~~>", "~~}"]), body(&["~~}"])).prop_map(|(o, e)| Piece {
            markup: format!("{{~~{}~~>{}~~}}", o, e),
            original: o,
            edited: e,
        }),
        body(&["<<}"]).prop_map(|b| Piece {
            markup: format!("{{>>zz{}<<}}", b),
            original: String::new(),
            edited: String::new(),
        }),
        body(&["==}"]).prop_map(|b| Piece {
            markup: format!("{{=={}==}}", b),
            original: b.clone(),
            edited: b,
        }),
    ]
}

fn document() -> impl Strategy<Value = Vec<Piece>> {
    prop::collection::vec(piece(), 0..12)
}

proptest! {
    #[test]
    fn ranges_reconstruct_any_input(source in delimiter_soup()) {
        let scanned = scan_str(&source);
        prop_assert_eq!(source_slices(&source, &scanned), source.clone());
    }

    #[test]
    fn ranges_reconstruct_any_bytes(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut rebuilt = Vec::new();
        let mut cursor = 0;
        for scanned in Scanner::new(&bytes[..]) {
            let (_, range) = scanned.unwrap();
            prop_assert_eq!(range.start, cursor);
            cursor = range.end;
            rebuilt.extend_from_slice(&bytes[range]);
        }
        prop_assert_eq!(rebuilt, bytes);
    }

    #[test]
    fn segments_resynthesize_their_source(source in delimiter_soup()) {
        for (segment, range) in scan_str(&source) {
            let slice = &source[range];
            let malformed_substitution =
                matches!(segment, Segment::Substitution { .. }) && !slice.contains("~~>");
            if !malformed_substitution {
                prop_assert_eq!(segment.source(), slice.as_bytes());
            }
        }
    }

    #[test]
    fn literal_runs_are_coalesced(source in delimiter_soup()) {
        let scanned = scan_str(&source);
        for pair in scanned.windows(2) {
            let both_literal = matches!(pair[0].0, Segment::Literal { .. })
                && matches!(pair[1].0, Segment::Literal { .. });
            prop_assert!(!both_literal, "{:?}", pair);
        }
    }

    #[test]
    fn rendering_never_panics(source in delimiter_soup()) {
        for policy in POLICIES {
            render_str(&source, &policy, &BracketSyntax);
        }
    }

    #[test]
    fn readings_match_the_model(pieces in document()) {
        let source: String = pieces.iter().map(|p| p.markup.as_str()).collect();
        let original: String = pieces.iter().map(|p| p.original.as_str()).collect();
        let edited: String = pieces.iter().map(|p| p.edited.as_str()).collect();

        let raw_original = RenderPolicy::new(View::OriginalOnly, Mode::Raw);
        let raw_edited = RenderPolicy::new(View::EditedOnly, Mode::Raw);
        prop_assert_eq!(render_str(&source, &raw_original, &BracketSyntax), original);
        prop_assert_eq!(render_str(&source, &raw_edited, &BracketSyntax), edited);
    }

    #[test]
    fn comments_never_leak_into_readings(pieces in document()) {
        let source: String = pieces.iter().map(|p| p.markup.as_str()).collect();
        for policy in POLICIES {
            if policy.view != View::ShowAll {
                let rendered = render_str(&source, &policy, &BracketSyntax);
                prop_assert!(!rendered.contains("zz"), "{:?}: {}", policy, rendered);
            }
        }
    }

    #[test]
    fn text_without_braces_renders_as_itself(source in "[^{]{0,64}") {
        for policy in POLICIES {
            prop_assert_eq!(render_str(&source, &policy, &BracketSyntax), source.clone());
        }
    }
}
