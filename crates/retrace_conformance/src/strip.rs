//! A stage-1 compiler that erases type syntax.
//!
//! Handles `interface` and `type` declarations, annotations on `const`,
//! `let` and `var` bindings, and annotations on `function` parameters and
//! return types. Every other token is copied through. Lines left with no
//! tokens are dropped, so intermediate lines shift relative to the input;
//! the emitted map records one mapping per surviving token.

use crate::lexer::{tokenize, Token, TokenKind};
use retrace_config::CompilerOptions;
use retrace_diagnostics::CompilerDiagnostic;
use retrace_pipeline::{CompileOutput, Stage1Compiler};
use sourcemap::SourceMapBuilder;

/// Erases type annotations and declarations from typed source.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeStripper;

impl Stage1Compiler for TypeStripper {
    fn compile(&self, source: &str, file_name: &str, options: &CompilerOptions) -> CompileOutput {
        let (tokens, lex_errors) = tokenize(source);
        let mut diagnostics: Vec<CompilerDiagnostic> = lex_errors
            .into_iter()
            .map(|e| {
                CompilerDiagnostic::error(e.message).at(file_name, source, char_offset(source, e.offset))
            })
            .collect();
        diagnostics.extend(check_brackets(&tokens, source, file_name));

        let keep = strip_types(&tokens);
        let (output_text, builder) = emit(source, file_name, &tokens, &keep, options);

        let mut encoded = Vec::new();
        if let Err(e) = builder.into_sourcemap().to_writer(&mut encoded) {
            diagnostics.push(CompilerDiagnostic::error(format!(
                "Could not write source map: {e}"
            )));
        }

        CompileOutput {
            output_text,
            source_map_text: String::from_utf8_lossy(&encoded).into_owned(),
            diagnostics,
        }
    }
}

/// Diagnostics count characters; the lexer counts bytes.
fn char_offset(source: &str, byte_offset: u32) -> u32 {
    source[..byte_offset as usize].chars().count() as u32
}

fn closer_for(open: &str) -> &'static str {
    match open {
        "(" => ")",
        "[" => "]",
        _ => "}",
    }
}

/// Reports unbalanced brackets.
fn check_brackets(tokens: &[Token<'_>], source: &str, file_name: &str) -> Vec<CompilerDiagnostic> {
    let mut stack: Vec<&str> = Vec::new();
    let mut diagnostics = Vec::new();
    for token in tokens.iter().filter(|t| t.kind == TokenKind::Punct) {
        match token.text {
            "(" | "[" | "{" => stack.push(token.text),
            ")" | "]" | "}" => match stack.pop() {
                Some(open) if closer_for(open) == token.text => {}
                Some(open) => diagnostics.push(
                    CompilerDiagnostic::error(format!("'{}' expected.", closer_for(open)))
                        .at(file_name, source, char_offset(source, token.offset)),
                ),
                None => diagnostics.push(
                    CompilerDiagnostic::error("Declaration or statement expected.")
                        .at(file_name, source, char_offset(source, token.offset)),
                ),
            },
            _ => {}
        }
    }
    if let Some(open) = stack.pop() {
        diagnostics.push(
            CompilerDiagnostic::error(format!("'{}' expected.", closer_for(open)))
                .at(file_name, source, source.chars().count() as u32),
        );
    }
    diagnostics
}

/// Index of the first token from `from` that is one of `stops` at bracket
/// depth zero, or of an unmatched closing bracket. `tokens.len()` if neither.
fn scan_type(tokens: &[Token<'_>], from: usize, stops: &[&str]) -> usize {
    let mut depth = 0usize;
    for (k, token) in tokens.iter().enumerate().skip(from) {
        if depth == 0 && stops.contains(&token.text) {
            return k;
        }
        match token.text {
            "(" | "[" | "{" | "<" => depth += 1,
            ")" | "]" | "}" | ">" => {
                if depth == 0 {
                    return k;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    tokens.len()
}

fn text_at<'a>(tokens: &[Token<'a>], k: usize) -> &'a str {
    tokens.get(k).map_or("", |t| t.text)
}

fn ident_at(tokens: &[Token<'_>], k: usize) -> bool {
    tokens.get(k).is_some_and(|t| t.kind == TokenKind::Ident)
}

/// Index of the last token of a type-only declaration starting at `k`, if
/// one starts there.
fn declaration_end(tokens: &[Token<'_>], k: usize) -> Option<usize> {
    if !ident_at(tokens, k + 1) {
        return None;
    }
    let end = match (tokens[k].text, text_at(tokens, k + 2)) {
        ("interface", "{") => scan_type(tokens, k + 3, &[]),
        ("type", "=" | "<") => scan_type(tokens, k + 2, &[";"]),
        _ => return None,
    };
    Some(end.min(tokens.len() - 1))
}

/// Clears `keep` for the annotations inside a parameter list opening at
/// `open`, and for a return type after it. Returns the index to resume at.
fn strip_params(tokens: &[Token<'_>], open: usize, keep: &mut [bool]) -> usize {
    let mut k = open + 1;
    while k < tokens.len() && !tokens[k].is(")") {
        if ident_at(tokens, k) {
            let colon = match (text_at(tokens, k + 1), text_at(tokens, k + 2)) {
                (":", _) => Some((k + 1, k + 2)),
                ("?", ":") => Some((k + 1, k + 3)),
                _ => None,
            };
            if let Some((from, type_start)) = colon {
                let end = scan_type(tokens, type_start, &[",", ")", "="]);
                keep[from..end].fill(false);
                k = end;
            }
        }
        k = scan_type(tokens, k, &[",", ")"]);
        if text_at(tokens, k) != "," {
            break;
        }
        k += 1;
    }
    if text_at(tokens, k) != ")" {
        return k;
    }
    if text_at(tokens, k + 1) == ":" {
        let end = scan_type(tokens, k + 2, &["{"]);
        keep[k + 1..end].fill(false);
        return end;
    }
    k + 1
}

/// Decides which tokens survive type erasure.
fn strip_types(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut keep = vec![true; tokens.len()];
    let mut at_statement_start = true;
    let mut k = 0;
    while k < tokens.len() {
        if at_statement_start {
            if let Some(end) = declaration_end(tokens, k) {
                keep[k..=end].fill(false);
                k = end + 1;
                continue;
            }
        }
        match tokens[k].text {
            "const" | "let" | "var" if ident_at(tokens, k + 1) && text_at(tokens, k + 2) == ":" => {
                let end = scan_type(tokens, k + 3, &["=", ";", ","]);
                keep[k + 2..end].fill(false);
                k = end;
                at_statement_start = false;
                continue;
            }
            "function" => {
                let open = if ident_at(tokens, k + 1) { k + 2 } else { k + 1 };
                if text_at(tokens, open) == "(" {
                    k = strip_params(tokens, open, &mut keep);
                    at_statement_start = false;
                    continue;
                }
            }
            _ => {}
        }
        at_statement_start = matches!(tokens[k].text, ";" | "{" | "}");
        k += 1;
    }
    keep
}

/// Prints the surviving tokens line by line and records one mapping per token.
fn emit(
    source: &str,
    file_name: &str,
    tokens: &[Token<'_>],
    keep: &[bool],
    options: &CompilerOptions,
) -> (String, SourceMapBuilder) {
    let mut builder = SourceMapBuilder::new(None);
    let src_id = builder.add_source(file_name);
    if options.flag("inlineSources") {
        builder.set_source_contents(src_id, Some(source));
    }

    let mut output = String::new();
    let mut out_line = 0u32;
    let mut kept = tokens.iter().zip(keep).filter(|(_, k)| **k).map(|(t, _)| t).peekable();
    while let Some(first) = kept.next() {
        let line_start = first.line_start();
        let indent = source[line_start..]
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        let mut line = String::from(&source[line_start..line_start + indent]);

        let mut token = first;
        let mut leading = true;
        loop {
            if !leading && token.spaced {
                line.push(' ');
            }
            leading = false;
            builder.add(
                out_line,
                line.len() as u32,
                token.line,
                token.column,
                Some(file_name),
                None,
                false,
            );
            line.push_str(token.text);
            match kept.next_if(|next| next.line == first.line) {
                Some(next) => token = next,
                None => break,
            }
        }

        output.push_str(&line);
        output.push('\n');
        out_line += 1;
    }
    (output, builder)
}
