//! Log argument values and their structural text rendering.
//!
//! Logging calls accept any mix of argument types. Each argument is converted
//! into a [`Value`]; strings are printed verbatim while everything else goes
//! through [`inspect`], which renders object-literal syntax:
//!
//! ```text
//! { name: 'fxlog', tags: [ 'a', 'b' ], nested: { ok: true } }
//! ```
//!
//! Arrays and objects are shared, mutable nodes, so a value graph can contain
//! cycles. Rendering is cycle-safe: the node a cycle points back to is tagged
//! `<ref *n>` and the back edge is printed as `[Circular *n]`. Nesting deeper
//! than [`DEFAULT_DEPTH`] levels is abbreviated to `[Object]` / `[Array]`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable array node.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable object node with insertion-ordered keys.
pub type ObjectRef = Rc<RefCell<Vec<(String, Value)>>>;

/// A single log argument.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    /// Text already rendered by the caller, printed as-is.
    Raw(String),
}

impl Value {
    /// Build an array node.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Array(Rc::new(RefCell::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Build an object node; keys keep their insertion order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(Rc::new(RefCell::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )))
    }

    /// Render any `Debug` value and carry the text verbatim.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Raw(format!("{value:?}"))
    }

    /// Set `key` on an object node, replacing an existing entry in place.
    ///
    /// Returns `false` when `self` is not an object.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let Self::Object(entries) = self else {
            return false;
        };
        let key = key.into();
        let value = value.into();
        let mut entries = entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
        true
    }

    /// Append to an array node. Returns `false` when `self` is not an array.
    pub fn push(&self, value: impl Into<Value>) -> bool {
        let Self::Array(items) = self else {
            return false;
        };
        items.borrow_mut().push(value.into());
        true
    }

    /// Returns true for string values.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }
}

/// Nesting levels expanded by [`inspect`]; deeper arrays and objects print as
/// `[Array]` / `[Object]`.
pub const DEFAULT_DEPTH: usize = 2;

/// Render a value the way it appears nested inside a structure.
///
/// Strings come back quoted; use `Display` to get top-level message text.
#[must_use]
pub fn inspect(value: &Value) -> String {
    inspect_depth(value, DEFAULT_DEPTH)
}

/// [`inspect`] with an explicit nesting limit.
///
/// Non-empty arrays and objects nested more than `depth` levels below the top
/// are abbreviated to `[Array]` / `[Object]`.
#[must_use]
pub fn inspect_depth(value: &Value, depth: usize) -> String {
    let mut cycles = CycleFinder {
        max_depth: depth,
        stack: Vec::new(),
        explored: HashMap::new(),
        targets: Vec::new(),
    };
    cycles.visit(value);

    let mut renderer = Renderer {
        max_depth: depth,
        targets: cycles.targets,
        stack: Vec::new(),
        out: String::new(),
    };
    renderer.write_value(value);
    renderer.out
}

fn node_id<T>(node: &Rc<T>) -> usize {
    Rc::as_ptr(node).cast::<()>() as usize
}

/// Records every node that is reachable from itself within the rendered depth.
struct CycleFinder {
    max_depth: usize,
    stack: Vec<usize>,
    /// Shallowest level each node has been expanded at.
    explored: HashMap<usize, usize>,
    /// Cycle targets in discovery order.
    targets: Vec<usize>,
}

impl CycleFinder {
    fn visit(&mut self, value: &Value) {
        let id = match value {
            Value::Array(items) => node_id(items),
            Value::Object(entries) => node_id(entries),
            _ => return,
        };

        if self.stack.contains(&id) {
            if !self.targets.contains(&id) {
                self.targets.push(id);
            }
            return;
        }

        let level = self.stack.len();
        if level > self.max_depth {
            return;
        }
        if self.explored.get(&id).is_some_and(|&seen| seen <= level) {
            return;
        }
        self.explored.insert(id, level);

        self.stack.push(id);
        match value {
            Value::Array(items) => {
                for item in items.borrow().iter() {
                    self.visit(item);
                }
            }
            Value::Object(entries) => {
                for (_, item) in entries.borrow().iter() {
                    self.visit(item);
                }
            }
            _ => {}
        }
        self.stack.pop();
    }
}

struct Renderer {
    max_depth: usize,
    targets: Vec<usize>,
    stack: Vec<usize>,
    out: String,
}

impl Renderer {
    fn ref_number(&self, id: usize) -> Option<usize> {
        self.targets.iter().position(|&t| t == id).map(|i| i + 1)
    }

    /// Writes the circular marker and returns true if `id` is an ancestor.
    fn write_circular(&mut self, id: usize) -> bool {
        if !self.stack.contains(&id) {
            return false;
        }
        match self.ref_number(id) {
            Some(n) => self.out.push_str(&format!("[Circular *{n}]")),
            None => self.out.push_str("[Circular]"),
        }
        true
    }

    fn write_ref_tag(&mut self, id: usize) {
        if let Some(n) = self.ref_number(id) {
            self.out.push_str(&format!("<ref *{n}> "));
        }
    }

    fn too_deep(&self) -> bool {
        self.stack.len() > self.max_depth
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Undefined => self.out.push_str("undefined"),
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.out.push_str(&i.to_string()),
            Value::Float(f) => self.out.push_str(&format_float(*f)),
            Value::String(s) => self.out.push_str(&quote(s)),
            Value::Raw(s) => self.out.push_str(s),
            Value::Array(items) => self.write_array(items),
            Value::Object(entries) => self.write_object(entries),
        }
    }

    fn write_array(&mut self, items: &ArrayRef) {
        let id = node_id(items);
        if self.write_circular(id) {
            return;
        }

        let items = items.borrow();
        if items.is_empty() {
            self.out.push_str("[]");
            return;
        }
        if self.too_deep() {
            self.out.push_str("[Array]");
            return;
        }
        self.write_ref_tag(id);

        self.stack.push(id);
        self.out.push_str("[ ");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.write_value(item);
        }
        self.out.push_str(" ]");
        self.stack.pop();
    }

    fn write_object(&mut self, entries: &ObjectRef) {
        let id = node_id(entries);
        if self.write_circular(id) {
            return;
        }

        let entries = entries.borrow();
        if entries.is_empty() {
            self.out.push_str("{}");
            return;
        }
        if self.too_deep() {
            self.out.push_str("[Object]");
            return;
        }
        self.write_ref_tag(id);

        self.stack.push(id);
        self.out.push_str("{ ");
        for (i, (key, item)) in entries.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if is_identifier(key) {
                self.out.push_str(key);
            } else {
                self.out.push_str(&quote(key));
            }
            self.out.push_str(": ");
            self.write_value(item);
        }
        self.out.push_str(" }");
        self.stack.pop();
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        // f64's Display already prints 3.0 as "3" and -0.0 as "-0".
        f.to_string()
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quote a string, preferring single quotes and switching when that avoids escapes.
fn quote(s: &str) -> String {
    let quote = if !s.contains('\'') {
        '\''
    } else if !s.contains('"') {
        '"'
    } else if !s.contains('`') {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl fmt::Display for Value {
    /// Message text: strings verbatim, everything else inspected.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            other => f.write_str(&inspect(other)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

// ─────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::String(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Int(i64::from(n))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Self::Float(n as f64), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::from(n as u64)
    }
}

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Self::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}
