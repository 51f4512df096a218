// font-magician/src/stylesheet.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A minimal stylesheet tree and the operations the rewriter needs from one.
//!
//! Parsing is tolerant rather than validating. `cssparser` tokenizes the source, and the tree
//! keeps the source text of selectors, at-rule params and declaration values, which is enough to
//! find font declarations and insert rules. Comments are dropped and output is compact
//! (`a{color:red;margin:0}`).

use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput};
use cssparser::{SourcePosition, Token};
use std::fmt::{self, Display, Formatter, Write};
use std::mem;

use crate::error::ParseError;

/// The operations the rewriter performs on a stylesheet.
///
/// Any syntax tree that can provide these can be rewritten; [`Stylesheet`] is the bundled one.
pub trait StyleTree {
    /// Calls `f` with every at-rule named `name`, at any depth.
    fn walk_at_rules(&self, name: &str, f: &mut dyn FnMut(&AtRule));

    /// Calls `f` with every declaration whose property satisfies `filter`, at any depth, in
    /// document order.
    fn walk_declarations(&self, filter: &dyn Fn(&str) -> bool, f: &mut dyn FnMut(&Declaration));

    /// Inserts `rules` before the existing content, keeping their order.
    fn prepend(&mut self, rules: Vec<AtRule>);

    /// Removes every at-rule named `name`, at any depth, and returns them in document order.
    fn remove_at_rules(&mut self, name: &str) -> Vec<AtRule>;
}

/// `property: value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Declaration {
        Declaration {
            property: property.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// `selector { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
}

/// `@name params { ... }` or `@name params;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `None` for statement at-rules such as `@import`.
    pub nodes: Option<Vec<Node>>,
}

impl AtRule {
    /// Creates a block at-rule holding only declarations.
    pub fn with_declarations(name: &str, declarations: Vec<Declaration>) -> AtRule {
        AtRule {
            name: name.to_owned(),
            params: String::new(),
            nodes: Some(declarations.into_iter().map(Node::Declaration).collect()),
        }
    }

    /// The direct declarations of this rule for `property`.
    pub fn declarations<'a>(
        &'a self,
        property: &'a str,
    ) -> impl Iterator<Item = &'a Declaration> + 'a {
        self.nodes
            .iter()
            .flatten()
            .filter_map(move |node| match *node {
                Node::Declaration(ref declaration) if declaration.property == property => {
                    Some(declaration)
                }
                _ => None,
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
}

/// A parsed stylesheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let nodes = parse_nodes(&mut parser)?;
        Ok(Stylesheet { nodes })
    }
}

impl StyleTree for Stylesheet {
    fn walk_at_rules(&self, name: &str, f: &mut dyn FnMut(&AtRule)) {
        walk_at_rules(&self.nodes, name, f)
    }

    fn walk_declarations(&self, filter: &dyn Fn(&str) -> bool, f: &mut dyn FnMut(&Declaration)) {
        walk_declarations(&self.nodes, filter, f)
    }

    fn prepend(&mut self, rules: Vec<AtRule>) {
        let existing = std::mem::replace(&mut self.nodes, vec![]);
        self.nodes = rules.into_iter().map(Node::AtRule).chain(existing).collect();
    }

    fn remove_at_rules(&mut self, name: &str) -> Vec<AtRule> {
        let mut removed = vec![];
        remove_at_rules(&mut self.nodes, name, &mut removed);
        removed
    }
}

fn walk_at_rules(nodes: &[Node], name: &str, f: &mut dyn FnMut(&AtRule)) {
    for node in nodes {
        match *node {
            Node::AtRule(ref at_rule) => {
                if at_rule.name == name {
                    f(at_rule);
                }
                if let Some(ref children) = at_rule.nodes {
                    walk_at_rules(children, name, f);
                }
            }
            Node::Rule(ref rule) => walk_at_rules(&rule.nodes, name, f),
            Node::Declaration(_) => {}
        }
    }
}

fn walk_declarations(
    nodes: &[Node],
    filter: &dyn Fn(&str) -> bool,
    f: &mut dyn FnMut(&Declaration),
) {
    for node in nodes {
        match *node {
            Node::Declaration(ref declaration) => {
                if filter(&declaration.property) {
                    f(declaration);
                }
            }
            Node::Rule(ref rule) => walk_declarations(&rule.nodes, filter, f),
            Node::AtRule(ref at_rule) => {
                if let Some(ref children) = at_rule.nodes {
                    walk_declarations(children, filter, f);
                }
            }
        }
    }
}

fn remove_at_rules(nodes: &mut Vec<Node>, name: &str, removed: &mut Vec<AtRule>) {
    let mut kept = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        match node {
            Node::AtRule(at_rule) if at_rule.name == name => removed.push(at_rule),
            Node::AtRule(mut at_rule) => {
                if let Some(ref mut children) = at_rule.nodes {
                    remove_at_rules(children, name, removed);
                }
                kept.push(Node::AtRule(at_rule));
            }
            Node::Rule(mut rule) => {
                remove_at_rules(&mut rule.nodes, name, removed);
                kept.push(Node::Rule(rule));
            }
            declaration => kept.push(declaration),
        }
    }
    *nodes = kept;
}

// Serialization

impl Display for Stylesheet {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write_nodes(f, &self.nodes)
    }
}

impl Display for AtRule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }
        match self.nodes {
            Some(ref nodes) => {
                f.write_char('{')?;
                write_nodes(f, nodes)?;
                f.write_char('}')
            }
            None => f.write_char(';'),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{{", self.selector)?;
        write_nodes(f, &self.nodes)?;
        f.write_char('}')
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.property, self.value)
    }
}

fn write_nodes(f: &mut Formatter, nodes: &[Node]) -> fmt::Result {
    for (index, node) in nodes.iter().enumerate() {
        match *node {
            Node::Rule(ref rule) => write!(f, "{}", rule)?,
            Node::AtRule(ref at_rule) => write!(f, "{}", at_rule)?,
            Node::Declaration(ref declaration) => {
                write!(f, "{}", declaration)?;
                if index + 1 < nodes.len() {
                    f.write_char(';')?;
                }
            }
        }
    }
    Ok(())
}

// Parsing

// The text of a rule prelude or declaration collected so far, without comments.
#[derive(Default)]
struct Prelude {
    text: String,
    // The at-keyword the prelude starts with, and where its params begin in `text`.
    at_keyword: Option<(String, usize)>,
    // Where the first top-level `:` is in `text`.
    colon: Option<usize>,
}

impl Prelude {
    fn into_block_node(self, children: Vec<Node>) -> Node {
        match self.at_keyword {
            Some((name, params)) => Node::AtRule(AtRule {
                name,
                params: self.text[params..].trim().to_owned(),
                nodes: Some(children),
            }),
            None => Node::Rule(Rule {
                selector: self.text.trim().to_owned(),
                nodes: children,
            }),
        }
    }

    fn into_statement_node(self) -> Option<Node> {
        if let Some((name, params)) = self.at_keyword {
            return Some(Node::AtRule(AtRule {
                name,
                params: self.text[params..].trim().to_owned(),
                nodes: None,
            }));
        }
        let colon = self.colon?;
        Some(Node::Declaration(Declaration {
            property: self.text[..colon].trim().to_owned(),
            value: self.text[colon + 1..].trim().to_owned(),
        }))
    }
}

// Parses nodes until the end of the current block, or of the input at top level.
fn parse_nodes<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Vec<Node>, ParseError> {
    let mut nodes = vec![];
    let mut prelude = Prelude::default();
    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Comment(_) => {}
            Token::Semicolon => {
                nodes.extend(mem::take(&mut prelude).into_statement_node());
            }
            Token::CurlyBracketBlock => {
                let (children, end) = parse_nested(input, |nested| parse_nodes(nested))?;
                if input.slice_from(end) != "}" {
                    return Err(ParseError::UnclosedBlock(start.byte_index()));
                }
                nodes.push(mem::take(&mut prelude).into_block_node(children));
            }
            // Inside a block the nested parser stops before its `}`, so this one is unmatched.
            Token::CloseCurlyBracket => return Err(ParseError::UnexpectedClose(start.byte_index())),
            Token::AtKeyword(ref name) if prelude.text.trim().is_empty() => {
                prelude.text.push_str(input.slice_from(start));
                prelude.at_keyword = Some((name.to_string(), prelude.text.len()));
            }
            Token::Colon if prelude.colon.is_none() && prelude.at_keyword.is_none() => {
                prelude.colon = Some(prelude.text.len());
                prelude.text.push(':');
            }
            token => copy_token(input, start, &token, &mut prelude.text)?,
        }
    }
    nodes.extend(prelude.into_statement_node());
    Ok(nodes)
}

// Appends the source text of `token`, which started at `start`, to `text`. Blocks are copied
// through their closing delimiter.
fn copy_token<'i, 't>(
    input: &mut Parser<'i, 't>,
    start: SourcePosition,
    token: &Token<'i>,
    text: &mut String,
) -> Result<(), ParseError> {
    match *token {
        Token::Comment(_) => Ok(()),
        Token::BadString(_) => Err(ParseError::UnterminatedString(start.byte_index())),
        Token::QuotedString(_) => {
            let raw = input.slice_from(start);
            if !is_terminated(raw) {
                return Err(ParseError::UnterminatedString(start.byte_index()));
            }
            text.push_str(raw);
            Ok(())
        }
        Token::Function(_)
        | Token::ParenthesisBlock
        | Token::SquareBracketBlock
        | Token::CurlyBracketBlock => {
            text.push_str(input.slice_from(start));
            let ((), end) = parse_nested(input, |nested| {
                loop {
                    let start = nested.position();
                    let token = match nested.next_including_whitespace_and_comments() {
                        Ok(token) => token.clone(),
                        Err(_) => return Ok(()),
                    };
                    copy_token(nested, start, &token, text)?;
                }
            })?;
            text.push_str(input.slice_from(end));
            Ok(())
        }
        _ => {
            text.push_str(input.slice_from(start));
            Ok(())
        }
    }
}

// Runs `parse` over the contents of the block that was just opened. Also returns where the
// contents end; the closing delimiter, if any, follows.
fn parse_nested<'i, 't, T, F>(
    input: &mut Parser<'i, 't>,
    parse: F,
) -> Result<(T, SourcePosition), ParseError>
where
    F: for<'tt> FnOnce(&mut Parser<'i, 'tt>) -> Result<T, ParseError>,
{
    let contents = input.position();
    input
        .parse_nested_block(|nested| match parse(nested) {
            Ok(result) => Ok((result, nested.position())),
            Err(err) => Err(nested.new_custom_error(err)),
        })
        .map_err(|err: CssParseError<'i, ParseError>| match err.kind {
            ParseErrorKind::Custom(err) => err,
            ParseErrorKind::Basic(_) => ParseError::UnexpectedToken(contents.byte_index()),
        })
}

// A string token running to the end of input has no closing quote.
fn is_terminated(raw: &str) -> bool {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close => {
            let escapes = chars.as_str().chars().rev().take_while(|&c| c == '\\').count();
            escapes % 2 == 0
        }
        _ => false,
    }
}
