//! Regular-expression extraction of names, argument lists and types from
//! header and list item text.

use std::sync::LazyLock;

use regex::Regex;

/// `sol.module.name(args)` → name, args
static FUNCTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\..*\.(.*)\((.*)\)").expect("function header regex"));

/// `object:name(args)` → name, args
static METHOD_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([a-zA-Z0-9_]+)\(([a-zA-Z0-9 _\[\],]*)\)").expect("method header regex")
});

/// `name (type): description` → name, type
static ARG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\((.*)\):").expect("argument line regex"));

static PAGE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lua_api_(.*)\.html").expect("page address regex"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex"));

/// Name and raw argument list of a documented function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub args: String,
}

/// One `<li>` of an argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgLine {
    Param { name: String, ty: String },
    Returns(String),
}

fn signature(re: &Regex, header: &str) -> Option<Signature> {
    let caps = re.captures(header)?;
    Some(Signature {
        name: caps[1].to_string(),
        args: caps[2].to_string(),
    })
}

pub fn parse_function_header(header: &str) -> Option<Signature> {
    signature(&FUNCTION_HEADER, header)
}

pub fn parse_method_header(header: &str) -> Option<Signature> {
    signature(&METHOD_HEADER, header)
}

/// Classify an argument list item. Items whose name mentions "Return value"
/// document the return type.
pub fn parse_arg_line(text: &str) -> Option<ArgLine> {
    let caps = ARG_LINE.captures(text)?;
    let name = caps[1].trim();
    let ty = caps[2].to_string();
    if name.contains("Return value") {
        Some(ArgLine::Returns(ty))
    } else {
        Some(ArgLine::Param {
            name: name.to_string(),
            ty: ty.replace(", optional", ""),
        })
    }
}

/// Module name of a page address: `lua_api_text_surface.html` → `text_surface`.
pub fn module_name(address: &str) -> Option<&str> {
    PAGE_ADDRESS
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite an argument list so documented parameters read `name: type`.
///
/// One left-to-right pass over identifiers: each documented name annotates its
/// first whole-word occurrence only, so `x` never touches `max_x` and inserted
/// type names are never rewritten. A documented name like `x, y` annotates each part.
pub fn annotate_args(args: &str, params: &[(String, String)]) -> String {
    let mut pending: Vec<(&str, &str)> = params
        .iter()
        .flat_map(|(name, ty)| {
            name.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(move |part| (part, ty.as_str()))
        })
        .collect();

    let mut out = String::with_capacity(args.len() + 16 * pending.len());
    let mut last = 0;
    for m in IDENTIFIER.find_iter(args) {
        let Some(pos) = pending.iter().position(|(name, _)| *name == m.as_str()) else {
            continue;
        };
        let (name, ty) = pending.remove(pos);
        out.push_str(&args[last..m.start()]);
        out.push_str(name);
        out.push_str(": ");
        out.push_str(ty);
        last = m.end();
    }
    out.push_str(&args[last..]);
    out
}
