//! Custom-property extraction from CSS.
//!
//! Only the parts of a stylesheet that define design tokens matter here:
//! custom properties (`--name: value`) declared for the light scope and the
//! dark scope. The parser is built on `cssparser`, so comments, escapes and
//! nested blocks are handled the way a browser tokenizes them.
//!
//! ## Scopes
//!
//! | Selector / block | Scope |
//! |------------------|-------|
//! | `:root`, `html` | light (base) |
//! | `.dark`, `:root.dark`, `html.dark` | dark |
//! | `@media (prefers-color-scheme: dark) { :root { … } }` | dark |
//! | `@media (prefers-color-scheme: light) { :root { … } }` | light |
//! | `@layer name { … }` | scope of the nested rules |
//!
//! Rules with any other selector are skipped, as are declarations that are not
//! custom properties.
//!
//! ```css
//! @layer base {
//!   :root { --primary: 221 83% 53%; --ring: var(--primary); }
//!   .dark { --primary: 217 91% 60%; }
//! }
//! ```

use std::collections::BTreeMap;

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use crate::mode::ThemeMode;

/// Nesting limit for `var()` substitution; deeper chains count as cycles.
const MAX_VAR_DEPTH: usize = 32;

/// Most `var()` references one computed value may expand.
const MAX_VAR_SUBSTITUTIONS: usize = 1024;

/// Longest substituted value; longer expansions are invalid.
const MAX_SUBSTITUTED_LEN: usize = 64 * 1024;

/// Custom properties defined by a stylesheet, split by theme scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    light: BTreeMap<String, String>,
    dark: BTreeMap<String, String>,
}

impl Stylesheet {
    /// Parses `css`. Rules that fail to parse are skipped.
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut collector = TokenRuleParser {
            sheet: Stylesheet::default(),
            media_mode: None,
        };

        let rules = cssparser::StyleSheetParser::new(&mut parser, &mut collector);
        for result in rules {
            if let Err((error, slice)) = result {
                tracing::debug!(kind = ?error.kind, rule = slice, "skipping unsupported CSS rule");
            }
        }

        collector.sheet
    }

    /// Names (without the leading `--`) defined in either scope.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self
            .light
            .keys()
            .chain(self.dark.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }

    /// Declares `--name: value` in the scope of `mode`.
    pub fn define(&mut self, mode: ThemeMode, name: &str, value: &str) {
        let name = name.trim_start_matches("--").to_string();
        let scope = match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        };
        scope.insert(name, value.trim().to_string());
    }

    /// Declared (unsubstituted) value of `--name` for `mode`.
    ///
    /// The dark scope overrides the light scope; properties the dark scope
    /// does not redefine fall through to the light declaration.
    pub fn declared(&self, name: &str, mode: ThemeMode) -> Option<&str> {
        let name = name.trim_start_matches("--");
        let dark = match mode {
            ThemeMode::Dark => self.dark.get(name),
            ThemeMode::Light => None,
        };
        dark.or_else(|| self.light.get(name)).map(String::as_str)
    }

    /// Computed value of `--name` for `mode`, with `var()` references
    /// substituted. Undefined, cyclic or unresolvable properties yield `None`.
    pub fn computed(&self, name: &str, mode: ThemeMode) -> Option<String> {
        let declared = self.declared(name, mode)?;
        self.substitute(declared, mode)
    }

    /// Substitutes every `var()` reference in `value` using the scope of `mode`.
    pub fn substitute(&self, value: &str, mode: ThemeMode) -> Option<String> {
        let mut budget = MAX_VAR_SUBSTITUTIONS;
        self.substitute_at(value, mode, 0, &mut budget)
    }

    fn substitute_at(
        &self,
        value: &str,
        mode: ThemeMode,
        depth: usize,
        budget: &mut usize,
    ) -> Option<String> {
        if depth > MAX_VAR_DEPTH {
            return None;
        }

        let mut output = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = find_var(rest) {
            output.push_str(&rest[..start]);
            let arguments_start = start + "var(".len();
            let close = matching_paren(&rest[arguments_start..])?;
            let arguments = &rest[arguments_start..arguments_start + close];

            *budget = budget.checked_sub(1)?;

            let (name, fallback) = match arguments.split_once(',') {
                Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
                None => (arguments.trim(), None),
            };
            let replacement = match self.declared(name, mode) {
                Some(declared) => self.substitute_at(declared, mode, depth + 1, budget)?,
                None => self.substitute_at(fallback?, mode, depth + 1, budget)?,
            };
            output.push_str(&replacement);
            if output.len() > MAX_SUBSTITUTED_LEN {
                return None;
            }
            rest = &rest[arguments_start + close + 1..];
        }
        output.push_str(rest);
        (output.len() <= MAX_SUBSTITUTED_LEN).then_some(output)
    }
}

/// Byte offset of the next `var(` that starts a function name.
fn find_var(value: &str) -> Option<usize> {
    let lower = value.to_ascii_lowercase();
    let mut offset = 0;
    while let Some(found) = lower[offset..].find("var(") {
        let index = offset + found;
        let preceded_by_name = lower[..index]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !preceded_by_name {
            return Some(index);
        }
        offset = index + 1;
    }
    None
}

/// Offset of the `)` closing an argument list that starts at `value[0]`.
fn matching_paren(value: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(index),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Which scope a selector list targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Dark,
    Other,
}

#[derive(Default)]
struct SelectorScan {
    root: bool,
    dark: bool,
    other: bool,
}

impl SelectorScan {
    fn finish(&mut self) -> Scope {
        let scope = if self.other {
            Scope::Other
        } else if self.dark {
            Scope::Dark
        } else if self.root {
            Scope::Root
        } else {
            Scope::Other
        };
        *self = SelectorScan::default();
        scope
    }
}

#[derive(Debug, Clone, Copy)]
enum AtPrelude {
    Layer,
    ColorScheme(ThemeMode),
}

struct TokenRuleParser {
    sheet: Stylesheet,
    /// Set while inside `@media (prefers-color-scheme: …)`.
    media_mode: Option<ThemeMode>,
}

impl TokenRuleParser {
    fn target_mode(&self, scope: Scope) -> Option<ThemeMode> {
        match (scope, self.media_mode) {
            (Scope::Other, _) => None,
            (Scope::Dark, _) => Some(ThemeMode::Dark),
            (Scope::Root, Some(mode)) => Some(mode),
            (Scope::Root, None) => Some(ThemeMode::Light),
        }
    }
}

impl<'i> QualifiedRuleParser<'i> for TokenRuleParser {
    type Prelude = Vec<Scope>;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let mut scopes = Vec::new();
        let mut scan = SelectorScan::default();

        while let Ok(token) = input.next() {
            match token.clone() {
                Token::Colon => match input.expect_ident_cloned() {
                    Ok(class) if class.eq_ignore_ascii_case("root") => scan.root = true,
                    _ => scan.other = true,
                },
                Token::Delim('.') => match input.expect_ident_cloned() {
                    Ok(class) if class.as_ref() == "dark" => scan.dark = true,
                    _ => scan.other = true,
                },
                Token::Ident(element) if element.eq_ignore_ascii_case("html") => scan.root = true,
                Token::Comma => scopes.push(scan.finish()),
                _ => scan.other = true,
            }
        }
        scopes.push(scan.finish());

        Ok(scopes)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let modes: Vec<ThemeMode> = prelude
            .into_iter()
            .filter_map(|scope| self.target_mode(scope))
            .collect();
        if modes.is_empty() {
            return Ok(());
        }

        let mut declarations = CustomPropertyParser;
        let body = RuleBodyParser::new(input, &mut declarations);
        for (name, value) in body.flatten() {
            for mode in &modes {
                self.sheet.define(*mode, &name, &value);
            }
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for TokenRuleParser {
    type Prelude = AtPrelude;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("layer") {
            while input.next().is_ok() {}
            return Ok(AtPrelude::Layer);
        }
        if !name.eq_ignore_ascii_case("media") {
            return Err(input.new_custom_error::<(), ()>(()));
        }

        let mut found: Option<ThemeMode> = None;
        loop {
            match input.next() {
                Ok(Token::ParenthesisBlock) => {
                    let nested = input.parse_nested_block(|input| {
                        input.expect_ident_matching("prefers-color-scheme")?;
                        input.expect_colon()?;
                        let value = input.expect_ident()?;
                        match value.as_ref() {
                            "dark" => Ok(ThemeMode::Dark),
                            "light" => Ok(ThemeMode::Light),
                            _ => Err(input.new_custom_error::<(), ()>(())),
                        }
                    });
                    if let Ok(mode) = nested {
                        found = Some(mode);
                    }
                }
                Err(_) => break,
                Ok(_) => {}
            }
        }

        match found {
            Some(mode) => Ok(AtPrelude::ColorScheme(mode)),
            None => Err(input.new_custom_error::<(), ()>(())),
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let previous = self.media_mode;
        if let AtPrelude::ColorScheme(mode) = prelude {
            self.media_mode = Some(mode);
        }

        let nested = cssparser::StyleSheetParser::new(input, self);
        for result in nested {
            if let Err((error, slice)) = result {
                tracing::debug!(kind = ?error.kind, rule = slice, "skipping unsupported nested CSS rule");
            }
        }

        self.media_mode = previous;
        Ok(())
    }
}

/// Collects `--name: value` declarations as raw text.
struct CustomPropertyParser;

impl<'i> DeclarationParser<'i> for CustomPropertyParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        if !name.starts_with("--") {
            return Err(input.new_custom_error::<(), ()>(()));
        }

        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start).trim();
        let value = strip_important(raw);

        Ok((name.as_ref().to_string(), value.to_string()))
    }
}

impl<'i> AtRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for CustomPropertyParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for CustomPropertyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

fn strip_important(raw: &str) -> &str {
    let lower = raw.to_ascii_lowercase();
    match lower.rfind('!') {
        Some(bang) if lower[bang + 1..].trim() == "important" => raw[..bang].trim_end(),
        _ => raw,
    }
}
