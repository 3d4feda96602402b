//! `package.js` generation: the bundler-side copy of [`ResourceRules`].

use crate::classify::ResourceRules;
use crate::error::{ResourceError, ResourceErrorExt};
use dojo_domain::config::ResourceConfig;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// A JavaScript regex that never matches, used for empty rule lists.
const NEVER: &str = "/(?!)/";

/// Compiles the rules for `package` and renders its `package.js`.
///
/// # Errors
/// See [`ResourceRules::from_config`].
pub fn render_package_descriptor(
    config: &ResourceConfig,
    package: &str,
) -> Result<String, ResourceError> {
    render_rules(&ResourceRules::from_config(config, package)?)
}

/// Renders a `package.js` whose `resourceTags` functions make the same
/// decisions as `rules`, with the same precedence.
///
/// # Errors
/// Returns [`ResourceError::Format`] if the text cannot be assembled.
pub fn render_rules(rules: &ResourceRules) -> Result<String, ResourceError> {
    let package = rules.package();
    let test_mids: Vec<String> =
        rules.test_dirs().iter().map(|dir| format!("{package}/{dir}")).collect();

    let mut w = String::new();
    writeln!(w, "var profile = (function(){{")?;
    writeln!(w, "    /* Resource tags for '{package}', generated by Dojo Builder */")?;
    writeln!(w, "    var testDirs = {},", lookup(&test_mids))?;
    writeln!(w, "        testResourceRe = {},", prefix_regex(package, rules.test_dirs()))?;
    writeln!(w, "        copyOnlyList = {},", lookup(rules.copy_only()))?;
    writeln!(w, "        resourceRe = {},", prefix_regex(package, rules.resource_dirs()))?;
    writeln!(w, "        imageRe = {};", image_regex(rules.extensions()))?;
    writeln!(w)?;
    writeln!(w, "    var isTest = function(filename, mid){{")?;
    writeln!(w, "        return (mid in testDirs) || testResourceRe.test(mid);")?;
    writeln!(w, "    }};")?;
    writeln!(w)?;
    writeln!(w, "    // descriptors, listed mids, non-CSS resources and images")?;
    writeln!(w, "    var isCopyOnly = function(filename, mid){{")?;
    writeln!(w, "        return (mid in copyOnlyList) ||")?;
    writeln!(w, "            (resourceRe.test(mid) && !/\\.css$/.test(filename)) ||")?;
    writeln!(w, "            imageRe.test(filename);")?;
    writeln!(w, "    }};")?;
    writeln!(w)?;
    writeln!(w, "    return {{")?;
    writeln!(w, "        resourceTags: {{")?;
    writeln!(w, "            test: function(filename, mid){{")?;
    writeln!(w, "                return isTest(filename, mid);")?;
    writeln!(w, "            }},")?;
    writeln!(w)?;
    writeln!(w, "            copyOnly: function(filename, mid){{")?;
    writeln!(w, "                return !isTest(filename, mid) && isCopyOnly(filename, mid);")?;
    writeln!(w, "            }},")?;
    writeln!(w)?;
    writeln!(w, "            amd: function(filename, mid){{")?;
    writeln!(w, "                return !isTest(filename, mid)")?;
    writeln!(w, "                    && !isCopyOnly(filename, mid)")?;
    writeln!(w, "                    && /\\.js$/.test(filename);")?;
    writeln!(w, "            }}")?;
    writeln!(w, "        }}")?;
    writeln!(w, "    }};")?;
    writeln!(w, "}})();")?;
    Ok(w)
}

/// Writes `package.js` text to `path`.
///
/// # Errors
/// Returns [`ResourceError::Io`] if the file cannot be written.
pub fn write_package_descriptor(path: &Path, text: &str) -> Result<(), ResourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, text)
        .context(format!("Failed to write package descriptor to {}", path.display()))?;
    info!("Wrote package descriptor to {}", path.display());
    Ok(())
}

/// `{ "a": true, "b": true }`
fn lookup(mids: &[String]) -> String {
    if mids.is_empty() {
        return "{}".to_owned();
    }
    let entries: Vec<String> = mids.iter().map(|mid| format!("{}: true", js_string(mid))).collect();
    format!("{{ {} }}", entries.join(", "))
}

fn prefix_regex(package: &str, dirs: &[String]) -> String {
    if dirs.is_empty() {
        return NEVER.to_owned();
    }
    let alternatives: Vec<String> =
        dirs.iter().map(|dir| js_regex_escape(&format!("{package}/{dir}/"))).collect();
    format!("/^(?:{})/", alternatives.join("|"))
}

fn image_regex(extensions: &[String]) -> String {
    if extensions.is_empty() {
        return NEVER.to_owned();
    }
    let alternatives: Vec<String> = extensions.iter().map(|ext| js_regex_escape(ext)).collect();
    format!("/\\.(?:{})$/i", alternatives.join("|"))
}

fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            },
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn js_regex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '/' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
