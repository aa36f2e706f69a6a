//! Abstract Syntax Tree for `.bind` module definition files.

use bindery_aop::Matcher;

/// Root node of a parsed `.bind` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionFile {
    /// Statements in source order.
    pub statements: Vec<Statement>,
}

impl DefinitionFile {
    /// Install sources in source order.
    pub fn installs(&self) -> impl Iterator<Item = &InstallDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Install(install) => Some(install),
            Statement::Bind(_) | Statement::Intercept(_) => None,
        })
    }

    /// Binding statements in source order.
    pub fn bindings(&self) -> impl Iterator<Item = &BindDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Bind(bind) => Some(bind),
            Statement::Install(_) | Statement::Intercept(_) => None,
        })
    }

    /// `bindInterceptor` statements in source order.
    pub fn intercepts(&self) -> impl Iterator<Item = &InterceptDecl> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Intercept(intercept) => Some(intercept),
            Statement::Install(_) | Statement::Bind(_) => None,
        })
    }
}

/// One top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `install('file.bind')`.
    Install(InstallDecl),
    /// `bind('I')->...`.
    Bind(BindDecl),
    /// `bindInterceptor(classMatcher, methodMatcher, [...])`.
    Intercept(InterceptDecl),
}

/// An `install` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDecl {
    /// Path of the installed file, relative to the installing file.
    pub source: String,
}

/// A `bind` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct BindDecl {
    /// Interface identifier; may be empty.
    pub interface: String,
    /// `annotatedWith` argument, if any.
    pub qualifier: Option<String>,
    /// Terminal call.
    pub target: TargetDecl,
}

/// Terminal call of a `bind` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetDecl {
    /// `->to('C')`.
    Class(String),
    /// `->toProvider('P')`.
    Provider(String),
    /// `->toInstance(value)`.
    Instance(ValueDecl),
}

/// A `toInstance` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueDecl {
    /// `'text'`.
    String(String),
    /// `21`.
    Integer(i64),
    /// `['a', 'b']`.
    Array(Vec<ValueDecl>),
    /// `object('Class', '{"json":"state"}')`.
    Object {
        /// Class of the captured object.
        class: String,
        /// JSON state, if given.
        state: Option<String>,
    },
}

/// A `bindInterceptor` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptDecl {
    /// Class-level matcher.
    pub class_matcher: Matcher,
    /// Method-level matcher.
    pub method_matcher: Matcher,
    /// Interceptor type identifiers.
    pub interceptors: Vec<String>,
}
