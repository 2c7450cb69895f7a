use critic_babel::{publish, HtmlSyntax, MarkdownOptions, PageTemplate, PublishOptions};
use critic_parser::{render_str, Mode, RenderPolicy, View};

const DRAFT: &str = "\
# Notes

The {~~colour~~>color~~} of the {==sky==}{>>really?<<} is *blue*.
";

#[test]
fn show_all_draft_to_html() {
    let rendered = render_str(DRAFT, &RenderPolicy::default(), &HtmlSyntax);
    let options = PublishOptions::default().with_markdown(MarkdownOptions::default());
    insta::assert_snapshot!(publish(&rendered, &options).trim_end(), @r###"
    <h1>Notes</h1>
    <p>The <del>colour</del><ins>color</ins> of the <mark>sky</mark><span class="critic comment">really?</span> is <em>blue</em>.</p>
    "###);
}

#[test]
fn edited_raw_draft_to_html() {
    let policy = RenderPolicy::new(View::EditedOnly, Mode::Raw);
    let rendered = render_str(DRAFT, &policy, &HtmlSyntax);
    let options = PublishOptions::default().with_markdown(MarkdownOptions::default());
    assert_eq!(
        publish(&rendered, &options),
        "<h1>Notes</h1>\n<p>The color of the sky is <em>blue</em>.</p>\n"
    );
}

#[test]
fn full_page_contains_rendered_body() {
    let rendered = render_str(DRAFT, &RenderPolicy::default(), &HtmlSyntax);
    let options = PublishOptions::default()
        .with_markdown(MarkdownOptions::default())
        .with_template(PageTemplate::new("Notes"));
    let page = publish(&rendered, &options);
    assert!(page.contains("<title>Notes</title>"));
    assert!(page.contains("<del>colour</del><ins>color</ins>"));
    assert!(page.trim_end().ends_with("</html>"));
}
