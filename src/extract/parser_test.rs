use super::*;
use crate::extract::{extract, FactTree};

fn tree(src: &str) -> FactTree {
    match extract(src) {
        Ok(t) => t,
        Err(e) => panic!("unexpected parse error: {e}"),
    }
}

fn first(tree: &FactTree, tag: &str) -> NodeId {
    tree.by_tag(tag)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no <{tag}> in tree"))
}

#[test]
fn test_nested_elements_and_fragments() {
    let src = r#"import React from 'react';
export function Card({ title }) {
  return (
    <div className="card">
      <h2>{title}</h2>
      <img src="a.png" />
      <>
        <span>Hi   there</span>
      </>
    </div>
  );
}
"#;
    let t = tree(src);
    assert_eq!(t.len(), 5);
    assert_eq!(t.root().children.len(), 1);

    let div = first(&t, "div");
    assert_eq!(t.node(div).literal("className"), Some("card"));
    assert_eq!(t.node(div).children.len(), 3);

    let h2 = first(&t, "h2");
    assert!(t.node(h2).dynamic_content);
    assert!(t.node(h2).text.is_empty());

    let span = first(&t, "span");
    assert_eq!(t.node(span).text, "Hi there");
    assert_eq!(t.path(span), "div > <> > span (line 8)");

    assert_eq!(t.script.exported_components, vec!["Card"]);
    assert_eq!(t.script.imports, vec!["react"]);
}

#[test]
fn test_attribute_kinds() {
    let src = r#"const a = <button aria-label="Close" disabled onClick={() => setOpen(false)} tabIndex={0} data-x={'lit'} hidden={false} {...rest}>x</button>;"#;
    let t = tree(src);
    let b = t.node(first(&t, "button"));
    assert_eq!(b.attr("aria-label"), Some(&AttrValue::Literal("Close".into())));
    assert_eq!(b.attr("disabled"), Some(&AttrValue::Flag(true)));
    assert_eq!(b.attr("hidden"), Some(&AttrValue::Flag(false)));
    assert_eq!(b.attr("tabIndex"), Some(&AttrValue::Literal("0".into())));
    assert_eq!(b.attr("data-x"), Some(&AttrValue::Literal("lit".into())));
    assert_eq!(
        b.attr("onClick"),
        Some(&AttrValue::Dynamic("() => setOpen(false)".into()))
    );
    assert!(b.has_handler("onClick"));
    assert!(b.spread);
    assert_eq!(b.text, "x");
}

#[test]
fn test_handlers_need_uppercase_after_on() {
    let t = tree(r#"const a = <div onClick={f} onKeyDown={g} onmouseover="x" one="1" />;"#);
    let div = t.node(first(&t, "div"));
    let handlers: Vec<&str> = div.handlers.iter().map(String::as_str).collect();
    assert_eq!(handlers, vec!["onClick", "onKeyDown"]);
    assert_eq!(t.interactive(), &[first(&t, "div")]);
}

#[test]
fn test_map_iteration_is_recorded() {
    let src = r"function List({ items }) {
  return (
    <ul>
      {items.map((item, i) => (
        <li key={i}>{item.name}</li>
      ))}
    </ul>
  );
}";
    let t = tree(src);
    let li = first(&t, "li");
    let it = t.node(li).iteration.as_ref().unwrap_or_else(|| panic!("li not iterated"));
    assert_eq!(it.receiver, "items");
    assert_eq!(it.bound, ListBound::Unbounded);
    assert_eq!(it.index_param.as_deref(), Some("i"));
    assert!(t.node(first(&t, "ul")).iteration.is_none());
}

#[test]
fn test_list_bounds() {
    let src = r"const a = (
  <div>
    {[1, 2, 3].map(n => <span key={n}>{n}</span>)}
    {Array.from({ length: 5 }).map((_, i) => <b key={i} />)}
    {rows.slice(0, 20).map(r => <tr key={r.id} />)}
    {data?.users!.map(u => <p key={u.id} />)}
  </div>
);";
    let t = tree(src);
    let bound = |tag: &str| t.iteration_of(first(&t, tag)).map(|it| it.bound);
    assert_eq!(bound("span"), Some(ListBound::Bounded(3)));
    assert_eq!(bound("b"), Some(ListBound::Bounded(5)));
    assert_eq!(bound("tr"), Some(ListBound::Bounded(20)));
    assert_eq!(bound("p"), Some(ListBound::Unbounded));
    assert_eq!(
        t.iteration_of(first(&t, "p")).map(|it| it.receiver.as_str()),
        Some("data?.users")
    );
}

#[test]
fn test_literal_list_item_counts() {
    assert_eq!(top_level_commas("1, 2, 3"), 2);
    assert_eq!(top_level_commas("'a', 'b',"), 1);
    assert_eq!(top_level_commas("{ a: 1, b: 2 }, [3, 4]"), 1);
    assert_eq!(bound_of("['a', 'b',]"), ListBound::Bounded(2));
    assert_eq!(bound_of("[]"), ListBound::Bounded(0));
}

#[test]
fn test_iteration_is_inherited_by_descendants() {
    let t = tree("const a = <ul>{xs.map(x => <li key={x}><a href={x}>go</a></li>)}</ul>;");
    let a = first(&t, "a");
    assert!(t.node(a).iteration.is_none());
    assert!(t.iteration_of(a).is_some());
}

#[test]
fn test_comment_only_container_is_not_content() {
    let t = tree("const a = <div>{/* todo */}<p>{x}</p></div>;");
    assert!(!t.node(first(&t, "div")).dynamic_content);
    assert!(t.node(first(&t, "p")).dynamic_content);
}

#[test]
fn test_conditional_markup() {
    let t = tree("function F() { return loading ? <Spinner /> : <section>{open && <Modal />}</section>; }");
    assert_eq!(t.by_tag("Spinner").len(), 1);
    assert_eq!(t.by_tag("Modal").len(), 1);
    let modal = first(&t, "Modal");
    assert!(t.node(modal).is_component());
    assert_eq!(t.node(modal).parent, Some(first(&t, "section")));
}

#[test]
fn test_generics_and_comparisons_are_not_markup() {
    let src = r"const identity = <T,>(value: T) => value;
function useBox<T extends object>(v: T) { return v; }
const [n, setN] = useState<number>(0);
if (a < b && i<n) { run(); }
interface Props { items: Array<Item>; }";
    let t = tree(src);
    assert!(t.is_empty());
}

#[test]
fn test_regex_literals_are_opaque() {
    let src = r#"export function Field({ s }) {
  const clean = s.replace(/'/g, '');
  const open = s.match(/\(x/);
  const close = /[)]/.test(s);
  const quoted = [/[/"]/, /a\/b/i];
  return <label>{clean}</label>;
}"#;
    let t = tree(src);
    assert_eq!(t.len(), 1);
    assert!(t.node(first(&t, "label")).dynamic_content);
}

#[test]
fn test_division_is_not_a_regex() {
    let src = "const w = (a / b / c) * total / 2;
const el = <p>{w / 3}</p>;";
    let t = tree(src);
    assert_eq!(t.len(), 1);
    let err = extract("const r = /abc;\nconst b = 1;").unwrap_err();
    assert!(err.reason.contains("unterminated regex literal"), "{}", err.reason);
}

#[test]
fn test_jsx_attribute_values() {
    let t = tree("const a = <Tooltip content={<span>hi</span>} icon=<Icon /> />;");
    let tip = t.node(first(&t, "Tooltip"));
    assert!(tip.attr("content").is_some_and(AttrValue::is_dynamic));
    assert!(tip.attr("icon").is_some_and(AttrValue::is_dynamic));
    assert_eq!(tip.children.len(), 2);
}

#[test]
fn test_style_element_feeds_css() {
    let t = tree("const a = <div><style>{`.btn:focus-visible { outline: 2px solid; }`}</style></div>;");
    assert!(t.script.css_focus_styles);
}

#[test]
fn test_unterminated_tag() {
    let err = extract(r#"const x = <div className="a""#).unwrap_err();
    assert_eq!((err.line, err.column), (1, 11));
    assert!(err.reason.contains("unterminated tag <div>"), "{}", err.reason);
}

#[test]
fn test_mismatched_closing_tag() {
    let err = extract("const x = <div><span></div></span>;").unwrap_err();
    assert!(
        err.reason.contains("expected </span>, found </div>"),
        "{}",
        err.reason
    );
}

#[test]
fn test_missing_closing_tag_reports_opening_position() {
    let err = extract("const a = 1;\nconst x = <div><p>hi</p>;").unwrap_err();
    assert_eq!((err.line, err.column), (2, 11));
    assert!(err.reason.contains("missing </div>"), "{}", err.reason);
}

#[test]
fn test_unterminated_attribute_value() {
    let err = extract(r#"const x = <a href="foo>bar</a>;"#).unwrap_err();
    assert!(err.reason.contains("unterminated attribute value"), "{}", err.reason);
}

#[test]
fn test_unbalanced_brackets() {
    let err = extract("function f() { return 1;").unwrap_err();
    assert_eq!((err.line, err.column), (1, 14));
    assert!(err.reason.contains("unclosed '{'"), "{}", err.reason);

    assert!(extract("function f() { return (<div />; }").is_err());
    assert!(extract("const a = 1; }").is_err());
}

#[test]
fn test_unterminated_literals() {
    assert!(extract("const s = 'abc;").is_err());
    assert!(extract("const s = `abc;").is_err());
    assert!(extract("/* abc").is_err());
}

#[test]
fn test_line_index_counts_columns_in_chars() {
    let idx = LineIndex::new("ab\ncdé\nx");
    assert_eq!(idx.span("ab\ncdé\nx", 0), Span { line: 1, column: 1 });
    assert_eq!(idx.span("ab\ncdé\nx", 4), Span { line: 2, column: 2 });
    assert_eq!(idx.span("ab\ncdé\nx", 8), Span { line: 3, column: 1 });
}
