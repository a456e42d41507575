//! Scraped API model and its conversion to the output tree.
//!
//! Output shape (ZeroBrane Studio API table):
//!
//! ```lua
//! {
//!   sol = { type = "lib", childs = { main = { type = "lib", description = ..., childs = {...} } } },
//!   sprite = { type = "class", description = ..., childs = {...}, inherits = "drawable" },
//! }
//! ```

use lua_table::{LuaValue, Mapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    Function,
    Method,
}

impl CallableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallableKind::Function => "function",
            CallableKind::Method => "method",
        }
    }
}

/// A documented function, method or event.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    pub name: String,
    pub kind: CallableKind,
    pub description: String,
    /// Argument list with documented types inlined (`x: number, y: number`).
    pub args: String,
    /// Comma-separated return types, empty when none are documented.
    pub returns: String,
}

impl Callable {
    pub fn to_value(&self) -> LuaValue {
        let mut map = Mapping::new();
        map.insert("type", self.kind.as_str());
        map.insert("description", self.description.as_str());
        map.insert("args", self.args.as_str());
        map.insert("returns", self.returns.as_str());
        map.insert("valuetype", self.returns.as_str());
        LuaValue::Mapping(map)
    }
}

/// `childs` table keyed by callable name. A later entry with the same name wins.
fn childs_value(childs: &[Callable]) -> LuaValue {
    LuaValue::Mapping(
        childs
            .iter()
            .map(|c| (c.name.clone(), c.to_value()))
            .collect(),
    )
}

/// A type with methods and events.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDoc {
    pub description: String,
    pub childs: Vec<Callable>,
    pub inherits: Option<String>,
}

impl ClassDoc {
    pub fn to_value(&self) -> LuaValue {
        let mut map = Mapping::new();
        map.insert("type", "class");
        map.insert("description", self.description.as_str());
        map.insert("childs", childs_value(&self.childs));
        map.insert("inherits", self.inherits.clone());
        LuaValue::Mapping(map)
    }
}

/// A module exposing free functions (`sol.<module>.*`).
#[derive(Debug, Clone, PartialEq)]
pub struct LibDoc {
    pub description: String,
    pub childs: Vec<Callable>,
}

impl LibDoc {
    pub fn to_value(&self) -> LuaValue {
        let mut map = Mapping::new();
        map.insert("type", "lib");
        map.insert("description", self.description.as_str());
        map.insert("childs", childs_value(&self.childs));
        LuaValue::Mapping(map)
    }
}

/// Everything collected by a scrape, in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDoc {
    pub namespace: String,
    pub modules: Vec<(String, LibDoc)>,
    pub classes: Vec<(String, ClassDoc)>,
}

impl ApiDoc {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            modules: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn module(&self, name: &str) -> Option<&LibDoc> {
        self.modules.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn class(&self, name: &str) -> Option<&ClassDoc> {
        self.classes.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassDoc> {
        self.classes
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Register or replace a library.
    pub fn insert_module(&mut self, name: &str, lib: LibDoc) {
        match self.modules.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = lib,
            None => self.modules.push((name.to_string(), lib)),
        }
    }

    /// Register or replace a class.
    pub fn insert_class(&mut self, name: &str, class: ClassDoc) {
        match self.class_mut(name) {
            Some(slot) => *slot = class,
            None => self.classes.push((name.to_string(), class)),
        }
    }

    /// `{ <namespace> = { type = "lib", childs = <modules> }, <class> = ..., ... }`
    pub fn to_value(&self) -> LuaValue {
        let modules: Mapping = self
            .modules
            .iter()
            .map(|(name, lib)| (name.clone(), lib.to_value()))
            .collect();
        let mut root_lib = Mapping::new();
        root_lib.insert("type", "lib");
        root_lib.insert("childs", modules);

        let mut root = Mapping::new();
        root.insert(self.namespace.clone(), root_lib);
        for (name, class) in &self.classes {
            root.insert(name.clone(), class.to_value());
        }
        LuaValue::Mapping(root)
    }
}
