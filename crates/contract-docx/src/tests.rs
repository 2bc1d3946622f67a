use std::fmt::Write;

use super::*;
use crate::convert::{ConversionContext, Converter};
use crate::document::TextRun;
use crate::token::{List, ListItem};

/// One line per element, compact enough for inline snapshots.
fn dump(doc: &StructuredDocument) -> String {
    let mut out = String::new();
    for element in &doc.elements {
        if !out.is_empty() {
            out.push('\n');
        }
        match element {
            DocumentElement::TableOfContents => out.push_str("toc"),
            DocumentElement::PageBreak => out.push_str("page-break"),
            DocumentElement::Heading { level, text } => {
                let _ = write!(out, "h{level} {text}");
            }
            DocumentElement::Paragraph(paragraph) => {
                out.push('p');
                if let Some(numbering) = &paragraph.numbering {
                    let instance = match numbering.instance {
                        Some(instance) => instance.to_string(),
                        None => "-".to_owned(),
                    };
                    let continued = if numbering.continued { " cont" } else { "" };
                    let _ = write!(
                        out,
                        " [{}#{instance}@{}{continued}]",
                        numbering.reference, numbering.level
                    );
                }
                for run in &paragraph.runs {
                    if run.line_break {
                        out.push_str(" <br>");
                    } else if run.bold {
                        let _ = write!(out, " *{:?}*", run.text.as_str());
                    } else {
                        let _ = write!(out, " {:?}", run.text.as_str());
                    }
                }
            }
        }
    }
    out
}

fn body(doc: &StructuredDocument) -> &[DocumentElement] {
    &doc.elements[2..]
}

fn contract() -> Vec<Section> {
    vec![
        Section::new(
            "partijen",
            vec![
                Token::heading(1, "Partijen"),
                Token::List(List::ordered(vec![
                    ListItem::text("a"),
                    ListItem::text("b"),
                ])),
                Token::paragraph(vec![Token::text("Slot")]),
            ],
        ),
        Section::new(
            "definities",
            vec![
                Token::List(List::ordered(vec![
                    ListItem::text("c").with_list(List::ordered(vec![ListItem::text("d")])),
                ])),
                Token::List(List::unordered(vec![ListItem::text("e")])),
            ],
        ),
    ]
}

#[test]
fn assembles_contract() {
    let doc = Engine::new().render(&contract()).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    h1 Partijen
    p [contract-list#1@0] "a"
    p [contract-list#1@0] "b"
    p "Slot"
    page-break
    p [contract-list#2@0] "c"
    p [contract-list#3@1] "d"
    p [dash-bullets#-@0] "e"
    "#);
}

#[test]
fn instances_follow_document_order() {
    let doc = Engine::new().render(&contract()).unwrap();
    let instances: Vec<_> = doc.lists.iter().map(|list| list.instance).collect();
    assert_eq!(instances, vec![1, 2, 3]);
    assert!(
        doc.lists
            .iter()
            .all(|list| list.reference == numbering::CONTRACT_LIST)
    );
}

#[test]
fn unordered_lists_do_not_consume_instances() {
    let sections = vec![Section::new(
        "overwegingen",
        vec![
            Token::List(List::unordered(vec![ListItem::text("x")])),
            Token::List(List::ordered(vec![ListItem::text("y")])),
        ],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    assert_eq!(doc.lists.len(), 1);
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p [dash-bullets#-@0] "x"
    p [contract-list#1@0] "y"
    "#);
}

#[test]
fn bullets_nest_under_ordered_items() {
    let sections = vec![Section::new(
        "deel_1",
        vec![Token::List(List::ordered(vec![
            ListItem::text("artikel").with_list(List::unordered(vec![ListItem::text("lid")])),
        ]))],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p [contract-list#1@0] "artikel"
    p [dash-bullets#-@1] "lid"
    "#);
}

#[test]
fn item_content_after_nested_list_stays_below_it() {
    let item = ListItem::new(vec![
        Token::text("outer"),
        Token::List(List::ordered(vec![ListItem::text("inner")])),
        Token::paragraph(vec![Token::text("tail")]),
    ]);
    let sections = vec![Section::new(
        "deel_1",
        vec![Token::List(List::unordered(vec![
            item,
            ListItem::text("next"),
        ]))],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p [dash-bullets#-@0] "outer"
    p [contract-list#1@1] "inner"
    p [dash-bullets#-@0 cont] "tail"
    p [dash-bullets#-@0] "next"
    "#);
}

#[test]
fn lexed_item_content_after_nested_list() {
    let sections = vec![Section::new(
        "deel_1",
        markdown::lex("- outer\n  - inner\n\n  tail\n"),
    )];

    let doc = Engine::new().render(&sections).unwrap();
    let texts: Vec<_> = body(&doc)
        .iter()
        .filter_map(|element| match element {
            DocumentElement::Paragraph(paragraph) => Some(
                paragraph
                    .runs
                    .iter()
                    .map(|run| run.text.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["outer", "inner", "tail"]);
}

#[test]
fn nested_inline_runs_keep_order() {
    let item = ListItem::new(vec![Token::Text {
        text: "Hello\nWorld".into(),
        tokens: Some(vec![Token::text("Hello"), Token::Br, Token::strong("World")]),
    }]);
    let sections = vec![Section::new(
        "definities",
        vec![Token::List(List::ordered(vec![item]))],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    let DocumentElement::Paragraph(paragraph) = &body(&doc)[0] else {
        panic!("expected a paragraph, got {:?}", body(&doc));
    };
    assert_eq!(
        paragraph.runs,
        vec![
            TextRun::plain("Hello"),
            TextRun::line_break(),
            TextRun::bold("World"),
        ]
    );
}

#[test]
fn space_becomes_empty_paragraph() {
    let sections = vec![Section::new(
        "partijen",
        vec![
            Token::heading(2, "Artikel 1"),
            Token::Space,
            Token::text("Tekst"),
        ],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    h2 Artikel 1
    p
    p "Tekst"
    "#);
}

#[test]
fn no_trailing_page_break() {
    let sections = vec![
        Section::new("a", vec![Token::text("1")]),
        Section::new("b", vec![]),
        Section::new("c", vec![Token::text("3")]),
    ];

    let doc = Engine::new().render(&sections).unwrap();
    let breaks = body(&doc)
        .iter()
        .filter(|element| **element == DocumentElement::PageBreak)
        .count();
    assert_eq!(breaks, 2);
    assert_ne!(doc.elements.last(), Some(&DocumentElement::PageBreak));
}

#[test]
fn empty_contract_has_only_toc() {
    let doc = Engine::new().render(&[]).unwrap();
    assert_eq!(
        doc.elements,
        vec![DocumentElement::TableOfContents, DocumentElement::PageBreak]
    );
    assert!(doc.lists.is_empty());
}

#[test]
fn heading_depths() {
    let render = |depth| {
        Engine::new().render(&[Section::new("s", vec![Token::heading(depth, "Kop")])])
    };

    assert!(render(1).is_ok());
    assert!(render(6).is_ok());
    assert!(matches!(render(0), Err(Error::InvalidDepth(0))));
    assert!(matches!(render(7), Err(Error::InvalidDepth(7))));

    assert_ne!(
        style::heading_style(1).unwrap(),
        style::heading_style(6).unwrap()
    );
}

#[test]
fn invalid_depth_aborts_later_sections() {
    let sections = vec![
        Section::new("a", vec![Token::heading(9, "Kop")]),
        Section::new("b", vec![Token::List(List::ordered(vec![ListItem::text("x")]))]),
    ];

    let err = Engine::new().render(&sections).unwrap_err();
    assert_eq!(err.to_string(), "invalid heading depth 9, expected 1 to 6");
}

#[test]
fn rendering_is_deterministic() {
    let engine = Engine::new();
    let first = engine.render(&contract()).unwrap();
    let second = engine.render(&contract()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_tokens_follow_policy() {
    let sections = vec![Section::new(
        "s",
        vec![
            Token::Other {
                kind: "codespan".into(),
                text: Some("x".into()),
            },
            Token::text("after"),
        ],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p "after"
    "#);

    let err = Engine::new()
        .with_policy(UnknownTokenPolicy::Error)
        .render(&sections)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedToken(ref kind) if kind == "codespan"));
}

#[test]
fn top_level_strong_and_br_follow_policy() {
    let sections = vec![Section::new(
        "s",
        vec![Token::strong("x"), Token::Br, Token::text("t")],
    )];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p "t"
    "#);

    let strict = Engine::new().with_policy(UnknownTokenPolicy::Error);
    let err = strict.render(&sections).unwrap_err();
    assert!(matches!(err, Error::UnsupportedToken(ref kind) if kind == "strong"));

    let err = strict
        .render(&[Section::new("s", vec![Token::Br])])
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported token `br`");
}

#[test]
fn strong_and_br_inside_paragraphs() {
    let sections = vec![Section::new(
        "s",
        vec![Token::paragraph(vec![
            Token::strong("Let op"),
            Token::text(": tekst"),
            Token::Br,
            Token::text("meer"),
        ])],
    )];

    let doc = Engine::new()
        .with_policy(UnknownTokenPolicy::Error)
        .render(&sections)
        .unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    p *"Let op"* ": tekst" <br> "meer"
    "#);
}

#[test]
fn foreign_list_id_is_unregistered() {
    let mut other = numbering::ListRegistry::new();
    other.register_ordered_list();
    let foreign = other.register_ordered_list();

    let mut registry = numbering::ListRegistry::new();
    let mut converter = Converter::new(&mut registry, UnknownTokenPolicy::Ignore);
    let ctx = ConversionContext {
        current_list: Some(foreign),
        level: Some(0),
    };

    let err = converter
        .convert(&Token::ListItem(ListItem::text("x")), ctx)
        .unwrap_err();
    assert!(matches!(err, Error::UnregisteredList(id) if id == foreign));
}

#[test]
fn bare_item_outside_list_is_a_bullet() {
    let mut registry = numbering::ListRegistry::new();
    let mut converter = Converter::new(&mut registry, UnknownTokenPolicy::Ignore);
    let elements = converter
        .convert_all(&[Token::ListItem(ListItem::text("los"))])
        .unwrap();

    let DocumentElement::Paragraph(paragraph) = &elements[0] else {
        panic!("expected a paragraph, got {elements:?}");
    };
    let annotation = paragraph.numbering.as_ref().unwrap();
    assert_eq!(annotation.reference, numbering::DASH_BULLETS);
    assert_eq!(annotation.instance, None);
    assert_eq!(annotation.level, 0);
}

#[test]
fn lexed_sections() {
    let sections = vec![
        Section::new(
            "partijen",
            markdown::lex("# Partijen\n\n1. **Opdrachtgever**: de gemeente\n2. Opdrachtnemer\n"),
        ),
        Section::new("ondertekening", markdown::lex("Getekend te Utrecht\n")),
    ];

    let doc = Engine::new().render(&sections).unwrap();
    insta::assert_snapshot!(dump(&doc), @r#"
    toc
    page-break
    h1 Partijen
    p [contract-list#1@0] *"Opdrachtgever"* ": de gemeente"
    p [contract-list#1@0] "Opdrachtnemer"
    page-break
    p "Getekend te Utrecht"
    "#);
}

#[test]
fn json_output() {
    let bytes = Engine::new()
        .render_to_vec(&contract(), Format::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["elements"][0]["kind"], "table_of_contents");
    assert_eq!(value["elements"][1]["kind"], "page_break");
    assert_eq!(value["elements"][2]["kind"], "heading");
    assert_eq!(value["elements"][3]["numbering"]["instance"], 1);
    assert_eq!(value["toc"]["title"], "Summary");
    assert_eq!(value["margins"]["top"], 1417);
    assert_eq!(value["lists"].as_array().map(Vec::len), Some(3));
}

#[cfg(feature = "docx")]
#[test]
fn docx_output() {
    let bytes = Engine::new()
        .render_to_vec(&contract(), Format::Docx)
        .unwrap();
    assert!(bytes.starts_with(b"PK"), "not a zip archive");

    let again = Engine::new()
        .render_to_vec(&contract(), Format::Docx)
        .unwrap();
    assert_eq!(bytes.len(), again.len());
}
