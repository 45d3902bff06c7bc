//! A stage-2 transformer that lowers block-scoped bindings to `var`.
//!
//! The output gains a `"use strict";` prologue line, so every input line `n`
//! lands on output line `n + 1`. `const` shrinks to `var`, shifting the rest
//! of its line two columns left. Mappings are recorded at the start of every
//! whitespace-separated word.

use retrace_common::Position;
use retrace_pipeline::{Stage2Transformer, TransformError, TransformOutput, TransformRequest};
use retrace_source::SourceFile;
use retrace_sourcemap::{OutputMap, RawMapping, SyntaxNode};
use serde_json::{Map, Value};
use sourcemap::SourceMapBuilder;

const PROLOGUE: &str = "\"use strict\";";

/// Which map shape [`Lowering`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapShape {
    /// A raw mapping list.
    Raw,
    /// A structured source map.
    Structured,
}

/// Lowers `const`/`let` to `var` under a strict-mode prologue.
#[derive(Clone, Copy, Debug)]
pub struct Lowering {
    shape: MapShape,
}

impl Lowering {
    /// Creates a transformer reporting maps of the given shape.
    pub fn new(shape: MapShape) -> Self {
        Self { shape }
    }
}

/// One mapped word of the input.
struct Word<'a> {
    input: Position,
    output_column: u32,
    name: Option<&'a str>,
}

/// One lowered line.
struct Line<'a> {
    text: String,
    words: Vec<Word<'a>>,
    indent: u32,
    declaration: Option<&'static str>,
}

/// Splits a line into words with their byte columns.
fn words_of(line: &str) -> Vec<(u32, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s as u32, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s as u32, &line[s..]));
    }
    words
}

fn identifier_prefix(word: &str) -> Option<&str> {
    let end = word
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(word.len());
    (end > 0).then(|| &word[..end])
}

fn lower_line(line_number: u32, line: &str) -> Line<'_> {
    let words = words_of(line);
    let indent = words.first().map_or(0, |(col, _)| *col);
    let keyword = words
        .first()
        .map(|(_, w)| *w)
        .filter(|w| matches!(*w, "const" | "let" | "var"));
    let shift = keyword.map_or(0, |k| k.len() as u32 - 3);

    let text = match keyword {
        Some(k) => format!("{}var{}", &line[..indent as usize], &line[indent as usize + k.len()..]),
        None => line.to_string(),
    };

    let mut mapped = Vec::new();
    for (index, (column, word)) in words.into_iter().enumerate() {
        let output_column = if index == 0 { column } else { column - shift };
        let name = if keyword.is_some() && index == 1 {
            identifier_prefix(word)
        } else {
            None
        };
        mapped.push(Word {
            input: Position::new(line_number, column),
            output_column,
            name,
        });
    }

    Line {
        text,
        words: mapped,
        indent,
        declaration: keyword.map(|_| "var"),
    }
}

fn statement_kind(line: &str) -> &'static str {
    match line.split_whitespace().next() {
        Some("const" | "let" | "var") => "VariableDeclaration",
        Some("function") => "FunctionDeclaration",
        Some("return") => "ReturnStatement",
        Some("if") => "IfStatement",
        _ => "ExpressionStatement",
    }
}

impl Stage2Transformer for Lowering {
    fn transform(&self, request: &TransformRequest) -> Result<TransformOutput, TransformError> {
        let lines: Vec<Line<'_>> = request
            .src
            .lines()
            .enumerate()
            .map(|(i, line)| lower_line(i as u32 + 1, line))
            .collect();

        if let Some((i, _)) = request
            .src
            .lines()
            .enumerate()
            .find(|(_, line)| line.split_whitespace().next() == Some("with"))
        {
            return Err(TransformError::new(format!(
                "{}: 'with' is not allowed in strict mode ({}:{})",
                request.filename,
                i + 1,
                lines[i].indent
            )));
        }

        let mut code = String::from(PROLOGUE);
        for line in &lines {
            code.push('\n');
            code.push_str(&line.text);
        }
        if request.src.ends_with('\n') {
            code.push('\n');
        }

        let map = match self.shape {
            MapShape::Raw => OutputMap::Raw(raw_map(&lines)),
            MapShape::Structured => OutputMap::Structured(structured_map(&lines, &request.filename)),
        };

        let mut metadata = Map::new();
        metadata.insert("strict".to_string(), Value::Bool(true));

        Ok(TransformOutput {
            code: Some(code),
            ast: Some(syntax_tree(&request.src, &request.filename, &lines)),
            map: Some(map),
            metadata,
        })
    }

    fn fingerprint(&self) -> Option<String> {
        let shape = match self.shape {
            MapShape::Raw => "raw",
            MapShape::Structured => "structured",
        };
        Some(format!("lowering-1-{shape}"))
    }
}

impl retrace_pipeline::PositionalTransformer for Lowering {
    fn transform(
        &self,
        src: &str,
        filename: &str,
        options: &Value,
    ) -> Result<TransformOutput, TransformError> {
        Stage2Transformer::transform(self, &TransformRequest::new(src, filename, options.clone()))
    }
}

fn output_position(word: &Word<'_>) -> Position {
    Position::new(word.input.line + 1, word.output_column)
}

fn raw_map(lines: &[Line<'_>]) -> Vec<RawMapping> {
    let mut mappings = vec![RawMapping::generated_only(Position::new(1, 0))];
    for word in lines.iter().flat_map(|l| &l.words) {
        let mapping = RawMapping::new(output_position(word), word.input);
        mappings.push(match word.name {
            Some(name) => mapping.named(name),
            None => mapping,
        });
    }
    mappings
}

fn structured_map(lines: &[Line<'_>], filename: &str) -> sourcemap::SourceMap {
    let mut builder = SourceMapBuilder::new(None);
    builder.add(0, 0, 0, 0, None, None, false);
    for word in lines.iter().flat_map(|l| &l.words) {
        let (dst_line, dst_col) = output_position(word).to_zero_based();
        let (src_line, src_col) = word.input.to_zero_based();
        builder.add(dst_line, dst_col, src_line, src_col, Some(filename), word.name, false);
    }
    builder.into_sourcemap()
}

/// Builds a tree located in input coordinates: one `body` statement per
/// statement line, with the prologue under `directives`.
fn syntax_tree(src: &str, filename: &str, lines: &[Line<'_>]) -> SyntaxNode {
    let end = SourceFile::new(filename, src).position(src.chars().count() as u32);
    let mut program = SyntaxNode::new("Program")
        .with_loc(Position::new(1, 0), end)
        .with_child("directives", SyntaxNode::new("Directive").with_field("value", "use strict"));

    for (i, (line, source_line)) in lines.iter().zip(src.lines()).enumerate() {
        let trimmed = source_line.trim_end();
        if trimmed.trim_start().is_empty() || trimmed.trim_start().starts_with('}') {
            continue;
        }
        let line_number = i as u32 + 1;
        let mut node = SyntaxNode::new(statement_kind(trimmed)).with_loc(
            Position::new(line_number, line.indent),
            Position::new(line_number, trimmed.len() as u32),
        );
        if let Some(kind) = line.declaration {
            node = node.with_field("kind", kind);
        }
        program = program.with_child("body", node);
    }
    program
}
