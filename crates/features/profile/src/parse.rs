//! Reader for descriptors written in the JavaScript object-literal subset the
//! bundler accepts: the generated shape as well as hand-written profiles.

use crate::error::ProfileError;
use dojo_domain::{
    BootLayer, BuildProfile, CssOptimizer, DescriptorFlag, Layer, Optimizer, Package,
    SelectorEngine, StripConsole, UnknownFlag,
};
use fxhash::FxHashMap;
use std::borrow::Cow;
use tracing::debug;

/// A literal value read from a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsNode>),
    /// Properties in source order.
    Object(Vec<(String, JsNode)>),
}

/// A value together with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct JsNode {
    pub offset: usize,
    pub value: JsValue,
}

impl JsValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::String(_) => "a string",
            Self::Array(_) => "an array",
            Self::Object(_) => "an object",
        }
    }
}

/// Parses a descriptor into a [`BuildProfile`].
///
/// Accepted wrappers: `var profile = ...`, an immediately invoked function
/// that `return`s the object, or a bare object literal. Keys the profile model
/// does not know are skipped.
///
/// # Errors
/// Returns [`ProfileError::Parse`] with the byte offset of the first problem.
pub fn parse_profile(text: &str) -> Result<BuildProfile, ProfileError> {
    let root = parse_descriptor(text)?;
    let profile = ProfileReader::default().read(&root)?;
    debug!(
        packages = profile.packages.len(),
        layers = profile.layer_count(),
        "Parsed build profile"
    );
    Ok(profile)
}

/// Parses a descriptor into its literal tree without interpreting any key.
///
/// # Errors
/// Returns [`ProfileError::Parse`] on syntax errors.
pub fn parse_descriptor(text: &str) -> Result<JsNode, ProfileError> {
    let mut parser = Parser::new(text);
    let node = parser.descriptor()?;
    parser.skip_trivia()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected '{c}' after the profile")));
    }
    Ok(node)
}

fn parse_error(offset: usize, message: impl Into<Cow<'static, str>>) -> ProfileError {
    ProfileError::Parse { offset, message: message.into(), context: None }
}

// --- Syntax ---

/// Deepest object/array nesting accepted.
const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    /// `var` declarations seen inside the function wrapper.
    bindings: FxHashMap<&'a str, JsValue>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0, bindings: FxHashMap::default() }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: impl Into<Cow<'static, str>>) -> ProfileError {
        parse_error(self.pos, message)
    }

    fn skip_trivia(&mut self) -> Result<(), ProfileError> {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                let end = trimmed.find('\n').unwrap_or(trimmed.len());
                self.pos += end;
            } else if trimmed.starts_with("/*") {
                let Some(end) = trimmed[2..].find("*/") else {
                    return Err(self.error("unterminated block comment"));
                };
                self.pos += end + 4;
            } else {
                return Ok(());
            }
        }
    }

    fn eat(&mut self, expected: char) -> Result<bool, ProfileError> {
        self.skip_trivia()?;
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ProfileError> {
        if self.eat(expected)? {
            return Ok(());
        }
        let found = self.peek().map_or_else(|| "end of input".to_owned(), |c| format!("'{c}'"));
        Err(self.error(format!("expected '{expected}', found {found}")))
    }

    /// Consumes `word` when it is the next identifier.
    fn eat_keyword(&mut self, word: &str) -> Result<bool, ProfileError> {
        self.skip_trivia()?;
        let rest = self.rest();
        let matches = rest.starts_with(word)
            && !rest[word.len()..].chars().next().is_some_and(is_ident_char);
        if matches {
            self.pos += word.len();
        }
        Ok(matches)
    }

    fn expect_keyword(&mut self, word: &str) -> Result<(), ProfileError> {
        if self.eat_keyword(word)? {
            Ok(())
        } else {
            Err(self.error(format!("expected '{word}'")))
        }
    }

    fn identifier(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let rest = self.rest();
        let len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        self.pos += len;
        Some(&self.src[start..self.pos])
    }

    fn descriptor(&mut self) -> Result<JsNode, ProfileError> {
        self.skip_trivia()?;
        if self.eat_keyword("var")? || self.eat_keyword("let")? || self.eat_keyword("const")? {
            self.skip_trivia()?;
            if self.identifier().is_none() {
                return Err(self.error("expected a variable name"));
            }
            self.expect('=')?;
        }

        self.skip_trivia()?;
        let node = if self.rest().starts_with('(') { self.iife()? } else { self.value()? };
        self.eat(';')?;
        Ok(node)
    }

    /// `(function(){ var name = <value>, ...; return <value>; })()`
    fn iife(&mut self) -> Result<JsNode, ProfileError> {
        self.expect('(')?;
        self.expect_keyword("function")?;
        self.expect('(')?;
        self.expect(')')?;
        self.expect('{')?;
        while self.eat_keyword("var")? || self.eat_keyword("let")? || self.eat_keyword("const")? {
            self.declarations()?;
        }
        self.expect_keyword("return")?;
        let node = self.value()?;
        self.eat(';')?;
        self.expect('}')?;
        self.expect(')')?;
        self.expect('(')?;
        self.expect(')')?;
        Ok(node)
    }

    fn declarations(&mut self) -> Result<(), ProfileError> {
        loop {
            self.skip_trivia()?;
            let Some(name) = self.identifier() else {
                return Err(self.error("expected a variable name"));
            };
            self.expect('=')?;
            let node = self.value()?;
            self.bindings.insert(name, node.value);
            if !self.eat(',')? {
                self.eat(';')?;
                return Ok(());
            }
        }
    }

    fn value(&mut self) -> Result<JsNode, ProfileError> {
        self.skip_trivia()?;
        let offset = self.pos;
        let value = match self.peek() {
            Some(open @ ('{' | '[')) => {
                if self.depth == MAX_DEPTH {
                    return Err(self.error("nesting too deep"));
                }
                self.depth += 1;
                let nested = if open == '{' { self.object() } else { self.array() };
                self.depth -= 1;
                nested?
            },
            Some(q @ ('\'' | '"')) => JsValue::String(self.string(q)?),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number()?,
            Some(_) => match self.identifier() {
                Some("true") => JsValue::Bool(true),
                Some("false") => JsValue::Bool(false),
                Some("null" | "undefined") => JsValue::Null,
                Some(name) => match self.bindings.get(name) {
                    Some(bound) => bound.clone(),
                    None => return Err(parse_error(offset, format!("unknown identifier '{name}'"))),
                },
                None => return Err(self.error("expected a value")),
            },
            None => return Err(self.error("expected a value, found end of input")),
        };
        Ok(JsNode { offset, value })
    }

    fn object(&mut self) -> Result<JsValue, ProfileError> {
        self.expect('{')?;
        let mut properties = Vec::new();
        loop {
            if self.eat('}')? {
                return Ok(JsValue::Object(properties));
            }
            let key = self.key()?;
            self.expect(':')?;
            properties.push((key, self.value()?));
            if !self.eat(',')? {
                self.expect('}')?;
                return Ok(JsValue::Object(properties));
            }
        }
    }

    fn key(&mut self) -> Result<String, ProfileError> {
        self.skip_trivia()?;
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.string(q),
            Some(c) if c.is_ascii_digit() => match self.number()? {
                JsValue::Number(n) => Ok(n.to_string()),
                _ => Err(self.error("expected a property name")),
            },
            _ => self
                .identifier()
                .map(str::to_owned)
                .ok_or_else(|| self.error("expected a property name")),
        }
    }

    fn array(&mut self) -> Result<JsValue, ProfileError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            if self.eat(']')? {
                return Ok(JsValue::Array(items));
            }
            items.push(self.value()?);
            if !self.eat(',')? {
                self.expect(']')?;
                return Ok(JsValue::Array(items));
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, ProfileError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(parse_error(start, "unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\n' | '\r' => return Err(parse_error(start, "line break inside a string")),
                '\\' => self.escape(&mut out)?,
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), ProfileError> {
        let at = self.pos - 1;
        let Some(c) = self.bump() else {
            return Err(parse_error(at, "unterminated escape"));
        };
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'u' => {
                let hex = self.rest().get(..4).filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()));
                let decoded = hex
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or_else(|| parse_error(at, "invalid \\u escape"))?;
                self.pos += 4;
                out.push(decoded);
            },
            // Line continuation.
            '\n' => {},
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            },
            other => out.push(other),
        }
        Ok(())
    }

    fn number(&mut self) -> Result<JsValue, ProfileError> {
        let start = self.pos;
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
            .unwrap_or(rest.len());
        self.pos += len;
        rest[..len]
            .parse::<f64>()
            .map(JsValue::Number)
            .map_err(|_| parse_error(start, format!("invalid number '{}'", &rest[..len])))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

// --- Interpretation ---

#[derive(Default)]
struct ProfileReader {
    profile: BuildProfile,
}

impl ProfileReader {
    fn read(mut self, root: &JsNode) -> Result<BuildProfile, ProfileError> {
        for (key, node) in properties(root, "the profile")? {
            match key.as_str() {
                "basePath" => self.profile.base_path = string(node, key)?,
                "releaseDir" => self.profile.release_dir = string(node, key)?,
                "releaseName" => self.profile.release_name = string(node, key)?,
                "action" => {
                    let action = string(node, key)?;
                    if action != BuildProfile::ACTION {
                        return Err(parse_error(
                            node.offset,
                            format!("unsupported action '{action}', only 'release' is emitted"),
                        ));
                    }
                },
                "layerOptimize" => self.profile.layer_optimize = flag::<Optimizer>(node, key)?,
                "optimize" => self.profile.optimize = flag::<Optimizer>(node, key)?,
                "cssOptimize" => self.profile.css_optimize = flag::<CssOptimizer>(node, key)?,
                "stripConsole" => self.profile.strip_console = flag::<StripConsole>(node, key)?,
                "selectorEngine" => {
                    self.profile.selector_engine = flag::<SelectorEngine>(node, key)?;
                },
                "mini" => self.profile.mini = boolean(node, key)?,
                "packages" => self.read_packages(node)?,
                "layers" => self.read_layers(node)?,
                other => debug!(key = other, "Skipping unknown profile key"),
            }
        }
        Ok(self.profile)
    }

    fn read_packages(&mut self, node: &JsNode) -> Result<(), ProfileError> {
        let JsValue::Array(items) = &node.value else {
            return Err(type_error(node, "packages", "an array"));
        };
        for item in items {
            let mut name = None;
            let mut location = None;
            for (key, value) in properties(item, "a package")? {
                match key.as_str() {
                    "name" => name = Some(string(value, key)?),
                    "location" => location = Some(string(value, key)?),
                    _ => {},
                }
            }
            let name = name.ok_or_else(|| parse_error(item.offset, "package without a name"))?;
            // The bundler resolves a package without a location next to its name.
            let location = location.unwrap_or_else(|| name.clone());
            self.profile.packages.push(Package { name, location });
        }
        Ok(())
    }

    fn read_layers(&mut self, node: &JsNode) -> Result<(), ProfileError> {
        for (name, layer) in properties(node, "layers")? {
            let mut boot = false;
            let mut custom_base = false;
            let mut includes = Vec::new();
            let mut excludes = None;
            for (key, value) in properties(layer, "a layer")? {
                match key.as_str() {
                    "boot" => boot = boolean(value, key)?,
                    "customBase" => custom_base = boolean(value, key)?,
                    "include" => includes = strings(value, key)?,
                    "exclude" => excludes = Some((value.offset, strings(value, key)?)),
                    _ => {},
                }
            }

            if !boot {
                let excludes = excludes.map(|(_, list)| list).unwrap_or_default();
                self.profile.layers.push(Layer { name: name.clone(), includes, excludes });
                continue;
            }
            if self.profile.boot_layer.is_some() {
                return Err(parse_error(layer.offset, format!("second boot layer '{name}'")));
            }
            if let Some((offset, list)) = excludes.filter(|(_, list)| !list.is_empty()) {
                return Err(parse_error(
                    offset,
                    format!("boot layer '{name}' cannot exclude {} modules", list.len()),
                ));
            }
            self.profile.boot_layer = Some(BootLayer { name: name.clone(), custom_base, includes });
        }
        Ok(())
    }
}

fn type_error(node: &JsNode, key: &str, expected: &str) -> ProfileError {
    parse_error(node.offset, format!("{key} must be {expected}, found {}", node.value.kind()))
}

fn properties<'n>(node: &'n JsNode, what: &str) -> Result<&'n [(String, JsNode)], ProfileError> {
    match &node.value {
        JsValue::Object(props) => Ok(props),
        _ => Err(type_error(node, what, "an object")),
    }
}

fn string(node: &JsNode, key: &str) -> Result<String, ProfileError> {
    match &node.value {
        JsValue::String(s) => Ok(s.clone()),
        _ => Err(type_error(node, key, "a string")),
    }
}

fn boolean(node: &JsNode, key: &str) -> Result<bool, ProfileError> {
    match node.value {
        JsValue::Bool(b) => Ok(b),
        _ => Err(type_error(node, key, "a boolean")),
    }
}

fn strings(node: &JsNode, key: &str) -> Result<Vec<String>, ProfileError> {
    match &node.value {
        JsValue::Array(items) => items.iter().map(|item| string(item, key)).collect(),
        _ => Err(type_error(node, key, "an array")),
    }
}

fn flag<T: DescriptorFlag>(node: &JsNode, key: &str) -> Result<T, ProfileError> {
    match &node.value {
        JsValue::String(s) => {
            s.parse().map_err(|e: UnknownFlag| parse_error(node.offset, e.to_string()))
        },
        JsValue::Bool(b) => T::from_bool(*b).ok_or_else(|| {
            parse_error(node.offset, format!("{key} does not accept the literal {b}"))
        }),
        _ => Err(type_error(node, key, "a string")),
    }
}
