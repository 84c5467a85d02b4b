//! Shader attribute and uniform lookup

use std::collections::HashMap;

/// Prefix shaders use for vertex attribute names
pub const ATTRIB_PREFIX: &str = "a_";

/// Prefix shaders use for uniform names
pub const UNIFORM_PREFIX: &str = "u_";

/// Linked shader program that can resolve names to backend handles
///
/// Handles are opaque: an attribute slot index for most APIs, a location
/// object for uniforms.
pub trait ProgramIntrospect {
    /// Handle for a vertex attribute
    type Attrib;

    /// Handle for a uniform
    type Uniform;

    /// Resolve a full attribute name such as `a_position`
    fn attrib_location(&self, name: &str) -> Option<Self::Attrib>;

    /// Resolve a full uniform name such as `u_matrix`
    fn uniform_location(&self, name: &str) -> Option<Self::Uniform>;
}

fn resolve_all<I, H>(
    names: I,
    prefix: &str,
    kind: &str,
    mut resolve: impl FnMut(&str) -> Option<H>,
) -> HashMap<String, H>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut locations = HashMap::new();
    for name in names {
        let name = name.as_ref();
        let full_name = format!("{prefix}{name}");
        match resolve(&full_name) {
            Some(handle) => {
                locations.insert(name.to_string(), handle);
            }
            None => log::warn!("Shader {} '{}' not found in program", kind, full_name),
        }
    }
    locations
}

/// Resolve `a_<name>` for every name, keyed by the bare name
///
/// Names the program does not know (unused attributes are often optimized
/// away by the shader compiler) are left out of the map.
pub fn attrib_locations<P, I>(program: &P, names: I) -> HashMap<String, P::Attrib>
where
    P: ProgramIntrospect + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    resolve_all(names, ATTRIB_PREFIX, "attribute", |name| program.attrib_location(name))
}

/// Resolve `u_<name>` for every name, keyed by the bare name
pub fn uniform_locations<P, I>(program: &P, names: I) -> HashMap<String, P::Uniform>
where
    P: ProgramIntrospect + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    resolve_all(names, UNIFORM_PREFIX, "uniform", |name| program.uniform_location(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeProgram {
        attributes: HashMap<&'static str, u32>,
        uniforms: HashMap<&'static str, String>,
    }

    impl FakeProgram {
        fn textured_quad() -> Self {
            Self {
                attributes: HashMap::from([("a_position", 0), ("a_texCoord", 1)]),
                uniforms: HashMap::from([
                    ("u_matrix", "matrix@0".to_string()),
                    ("u_image", "image@1".to_string()),
                ]),
            }
        }
    }

    impl ProgramIntrospect for FakeProgram {
        type Attrib = u32;
        type Uniform = String;

        fn attrib_location(&self, name: &str) -> Option<u32> {
            self.attributes.get(name).copied()
        }

        fn uniform_location(&self, name: &str) -> Option<String> {
            self.uniforms.get(name).cloned()
        }
    }

    #[test]
    fn test_attribs_keyed_by_bare_name() {
        let program = FakeProgram::textured_quad();

        let locations = attrib_locations(&program, ["position", "texCoord"]);

        assert_eq!(locations.len(), 2);
        assert_eq!(locations["position"], 0);
        assert_eq!(locations["texCoord"], 1);
    }

    #[test]
    fn test_uniforms_use_uniform_prefix() {
        let program = FakeProgram::textured_quad();

        let names = vec!["matrix".to_string(), "image".to_string()];
        let locations = uniform_locations(&program, names);

        assert_eq!(locations["matrix"], "matrix@0");
        assert_eq!(locations["image"], "image@1");
    }

    #[test]
    fn test_unresolved_names_are_dropped() {
        let program = FakeProgram::textured_quad();

        let attribs = attrib_locations(&program, ["position", "normal"]);
        let uniforms = uniform_locations(&program, ["position"]);

        assert_eq!(attribs.len(), 1);
        assert!(!attribs.contains_key("normal"));
        assert!(uniforms.is_empty());
    }

    #[derive(Debug, PartialEq)]
    struct SlotHandle(u32);

    struct SlotProgram;

    impl ProgramIntrospect for SlotProgram {
        type Attrib = SlotHandle;
        type Uniform = SlotHandle;

        fn attrib_location(&self, name: &str) -> Option<SlotHandle> {
            (name == "a_position").then_some(SlotHandle(3))
        }

        fn uniform_location(&self, name: &str) -> Option<SlotHandle> {
            (name == "u_matrix").then_some(SlotHandle(7))
        }
    }

    #[test]
    fn test_handles_need_not_be_clone() {
        let attribs = attrib_locations(&SlotProgram, ["position"]);
        let uniforms = uniform_locations(&SlotProgram, ["matrix"]);

        assert_eq!(attribs["position"], SlotHandle(3));
        assert_eq!(uniforms["matrix"], SlotHandle(7));
    }
}
