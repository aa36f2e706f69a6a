//! Replays a parsed definition file through the binder.

use std::collections::BTreeMap;

use bindery_common::error::{BinderyError, Result};
use bindery_core::{Binder, Configure, InstanceValue, Module, ObjectInstance};

use crate::parser::ast::{DefinitionFile, Statement, TargetDecl, ValueDecl};

/// A [`Configure`] implementation backed by a `.bind` file.
///
/// `install` statements are satisfied from already built modules keyed by
/// their install source, exactly as written in the file.
#[derive(Debug)]
pub struct DefinitionModule<'a> {
    name: String,
    file: &'a DefinitionFile,
    installed: BTreeMap<String, &'a Module>,
}

impl<'a> DefinitionModule<'a> {
    /// Creates a definition module with no installed modules available.
    pub fn new(name: impl Into<String>, file: &'a DefinitionFile) -> Self {
        Self {
            name: name.into(),
            file,
            installed: BTreeMap::new(),
        }
    }

    /// Makes `module` available to `install(source)`.
    #[must_use]
    pub fn with_installed(mut self, source: impl Into<String>, module: &'a Module) -> Self {
        let _ = self.installed.insert(source.into(), module);
        self
    }
}

impl Configure for DefinitionModule<'_> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn configure(&self, binder: &mut Binder) -> Result<()> {
        for statement in &self.file.statements {
            match statement {
                Statement::Install(install) => {
                    let module = self.installed.get(&install.source).ok_or_else(|| {
                        BinderyError::configuration(format!(
                            "install '{}' in {} was not resolved",
                            install.source, self.name
                        ))
                    })?;
                    binder.install(module);
                }
                Statement::Bind(bind) => {
                    let mut builder = binder.bind(bind.interface.as_str());
                    if let Some(qualifier) = &bind.qualifier {
                        builder = builder.annotated_with(qualifier.as_str());
                    }
                    match &bind.target {
                        TargetDecl::Class(class) => builder.to(class.as_str())?,
                        TargetDecl::Provider(provider) => builder.to_provider(provider.as_str())?,
                        TargetDecl::Instance(value) => {
                            builder.to_instance(instance_value(value)?)?;
                        }
                    }
                }
                Statement::Intercept(intercept) => {
                    let interceptors: Vec<&str> =
                        intercept.interceptors.iter().map(String::as_str).collect();
                    binder.bind_interceptor(
                        intercept.class_matcher.clone(),
                        intercept.method_matcher.clone(),
                        &interceptors,
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn instance_value(value: &ValueDecl) -> Result<InstanceValue> {
    Ok(match value {
        ValueDecl::String(s) => InstanceValue::String(s.clone()),
        ValueDecl::Integer(n) => InstanceValue::Integer(*n),
        ValueDecl::Array(items) => {
            InstanceValue::Array(items.iter().map(instance_value).collect::<Result<_>>()?)
        }
        ValueDecl::Object { class, state } => {
            let mut object = ObjectInstance::of(class.as_str());
            if let Some(state) = state {
                object.state = serde_json::from_str(state).map_err(|e| BinderyError::Parse {
                    message: format!("invalid JSON state for object '{class}': {e}"),
                })?;
            }
            InstanceValue::Object(object)
        }
    })
}

#[cfg(test)]
mod tests {
    use bindery_core::{BindingSpec, ModuleContext};

    use super::*;
    use crate::parser::parse_definition;

    fn build(name: &str, file: &DefinitionFile) -> Result<Module> {
        Module::new(&DefinitionModule::new(name, file), &ModuleContext::default().shared())
    }

    #[test]
    fn replays_bindings_in_order() {
        let file = parse_definition(
            r"
bind('')->annotatedWith('user_name')->toInstance('koriym')
bind('App\DbInterface')->to('App\UserDb')
bind('App\DbInterface')->to('App\OtherDb')
",
        )
        .expect("parse");
        let module = build("app", &file).expect("module");
        assert_eq!(module.name(), "app");
        assert_eq!(
            module.to_string(),
            "bind('')->annotatedWith('user_name')->toInstance((string)koriym)\n\
             bind('App\\DbInterface')->to('App\\OtherDb')\n"
        );
    }

    #[test]
    fn object_state_is_parsed_as_json() {
        let input = r#"bind('App\UserInterface')->toInstance(object('App\User', '{"id":7}'))"#;
        let file = parse_definition(input).expect("parse");
        let module = build("user", &file).expect("module");
        let Some(BindingSpec::ToInstance(InstanceValue::Object(user))) =
            module.lookup("App\\UserInterface", None)
        else {
            panic!("expected object instance");
        };
        assert_eq!(user.state["id"], 7);
    }

    #[test]
    fn invalid_object_state_fails() {
        let input = r"bind('App\UserInterface')->toInstance(object('App\User', '{oops'))";
        let file = parse_definition(input).expect("parse");
        let err = build("user", &file).unwrap_err();
        assert!(matches!(err, BinderyError::Parse { .. }));
    }

    #[test]
    fn unresolved_install_fails() {
        let file = parse_definition("install('base.bind')").expect("parse");
        let err = build("app", &file).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn installed_module_is_merged_at_statement_position() {
        let context = ModuleContext::default().shared();
        let base_file = parse_definition(
            r"
bind('App\DbInterface')->to('App\BaseDb')
bind('App\LogInterface')->to('App\FileLog')
",
        )
        .expect("parse");
        let base = Module::new(&DefinitionModule::new("base", &base_file), &context).expect("base");

        let app_file = parse_definition(
            r"
bind('App\DbInterface')->to('App\UserDb')
install('base.bind')
",
        )
        .expect("parse");
        let app = Module::new(
            &DefinitionModule::new("app", &app_file).with_installed("base.bind", &base),
            &context,
        )
        .expect("app");
        assert_eq!(
            app.to_string(),
            "bind('App\\DbInterface')->to('App\\UserDb')\n\
             bind('App\\LogInterface')->to('App\\FileLog')\n"
        );
    }
}
