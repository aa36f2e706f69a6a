//! Canonical text form of a binding registry.
//!
//! One line per binding, in registry order, each terminated by `\n`. The
//! unspecified qualifier produces no `annotatedWith` call.

use std::fmt::{self, Write as _};

use bindery_common::types::{InterfaceId, Qualifier};

use crate::module::Module;
use crate::registry::{BindingRegistry, BindingSpec};

/// Renders every binding of `registry`.
#[must_use]
pub fn render(registry: &BindingRegistry) -> String {
    registry
        .bindings()
        .fold(String::new(), |mut out, (interface, qualifier, spec)| {
            out.push_str(&render_line(interface, qualifier, spec));
            out
        })
}

/// Renders one binding, including its trailing newline.
#[must_use]
pub fn render_line(interface: &InterfaceId, qualifier: &Qualifier, spec: &BindingSpec) -> String {
    let mut line = format!("bind('{interface}')");
    if !qualifier.is_unspecified() {
        let _ = write!(line, "->annotatedWith('{qualifier}')");
    }
    let _ = match spec {
        BindingSpec::ToClass(class) => write!(line, "->to('{class}')"),
        BindingSpec::ToProvider(provider) => write!(line, "->toProvider('{provider}')"),
        BindingSpec::ToInstance(value) => write!(
            line,
            "->toInstance(({}){})",
            value.type_tag(),
            value.literal()
        ),
    };
    line.push('\n');
    line
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.registry()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BindingKey, InstanceValue, ObjectInstance};

    fn registry(entries: Vec<(BindingKey, BindingSpec)>) -> BindingRegistry {
        let mut registry = BindingRegistry::new();
        for (key, spec) in entries {
            registry.insert(key, spec).expect("unsealed");
        }
        registry
    }

    #[test]
    fn qualified_string_instance() {
        let registry = registry(vec![(
            BindingKey::new("", "user_name"),
            BindingSpec::ToInstance("koriym".into()),
        )]);
        assert_eq!(
            render(&registry),
            "bind('')->annotatedWith('user_name')->toInstance((string)koriym)\n"
        );
    }

    #[test]
    fn array_instance_is_json_quoted() {
        let registry = registry(vec![(
            BindingKey::new("", "adapters"),
            BindingSpec::ToInstance(vec!["html", "http"].into()),
        )]);
        assert_eq!(
            render(&registry),
            "bind('')->annotatedWith('adapters')->toInstance((array)[\"html\",\"http\"])\n"
        );
    }

    #[test]
    fn class_and_provider_targets_render_verbatim() {
        let registry = registry(vec![
            (
                BindingKey::unqualified("Ray\\Di\\DbInterface"),
                BindingSpec::ToClass("\\Ray\\Di\\Mock\\UserDb".into()),
            ),
            (
                BindingKey::unqualified("Ray\\Di\\LogInterface"),
                BindingSpec::ToProvider("Ray\\Di\\LogProvider".into()),
            ),
        ]);
        assert_eq!(
            render(&registry),
            "bind('Ray\\Di\\DbInterface')->to('\\Ray\\Di\\Mock\\UserDb')\n\
             bind('Ray\\Di\\LogInterface')->toProvider('Ray\\Di\\LogProvider')\n"
        );
    }

    #[test]
    fn object_and_integer_instances() {
        let object = InstanceValue::Object(ObjectInstance::of("\\App\\User"));
        assert_eq!(
            render_line(
                &InterfaceId::new("App\\UserInterface"),
                &Qualifier::unspecified(),
                &BindingSpec::ToInstance(object),
            ),
            "bind('App\\UserInterface')->toInstance((object)App\\User)\n"
        );
        assert_eq!(
            render_line(
                &InterfaceId::new(""),
                &Qualifier::new("user_age"),
                &BindingSpec::ToInstance(21_i64.into()),
            ),
            "bind('')->annotatedWith('user_age')->toInstance((integer)21)\n"
        );
    }

    #[test]
    fn empty_registry_renders_nothing() {
        assert_eq!(render(&BindingRegistry::new()), "");
    }
}
