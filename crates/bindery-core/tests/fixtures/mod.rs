//! Module fixtures shared by the integration tests.

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use bindery_aop::{InterceptorRegistry, Matcher, MethodInterceptor};
use bindery_common::config::BinderyConfig;
use bindery_common::error::Result;
use bindery_core::{Binder, ClassManifest, Configure, ModuleContext, ObjectInstance};

pub const DB_INTERFACE: &str = "Ray\\Di\\Mock\\DbInterface";
pub const LOG_INTERFACE: &str = "Ray\\Di\\Mock\\LogInterface";
pub const USER_INTERFACE: &str = "Ray\\Di\\Mock\\UserInterface";
pub const BILLING_SERVICE: &str = "Ray\\Di\\Tests\\RealBillingService";
pub const TAX_CHARGER: &str = "Ray\\Di\\Tests\\TaxCharger";
pub const METHOD_LOGGER: &str = "Ray\\Di\\Tests\\MethodLogger";

#[derive(Debug, Default)]
pub struct TaxCharger;

impl MethodInterceptor for TaxCharger {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct MethodLogger;

impl MethodInterceptor for MethodLogger {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn manifest() -> ClassManifest {
    ClassManifest::new()
        .with_class("Ray\\Di\\Mock\\UserDb")
        .with_class("Ray\\Di\\Mock\\User")
        .with_provider("Ray\\Di\\Modules\\DbProvider")
        .with_interceptor(TAX_CHARGER)
        .with_interceptor(METHOD_LOGGER)
        .with_method(BILLING_SERVICE, "chargeOrder", &["Tax"])
        .with_method(BILLING_SERVICE, "chargeOrderWithNoTax", &[])
}

pub fn context_with(config: BinderyConfig) -> Arc<ModuleContext> {
    ModuleContext::from_manifest(
        config,
        manifest(),
        InterceptorRegistry::new()
            .register(TAX_CHARGER, || TaxCharger)
            .register(METHOD_LOGGER, || MethodLogger),
    )
    .shared()
}

pub fn context() -> Arc<ModuleContext> {
    context_with(BinderyConfig::default())
}

pub struct BasicModule;

impl Configure for BasicModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\UserDb")
    }
}

pub struct ProviderModule;

impl Configure for ProviderModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder
            .bind(DB_INTERFACE)
            .to_provider("Ray\\Di\\Modules\\DbProvider")
    }
}

pub struct InstanceModule;

impl Configure for InstanceModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind("").annotated_with("id").to_instance("PC6001")?;
        binder.bind("").annotated_with("user_name").to_instance("koriym")?;
        binder.bind("").annotated_with("user_age").to_instance(21_i64)?;
        binder.bind("").annotated_with("user_gender").to_instance("male")?;
        binder.bind(DB_INTERFACE).to("\\Ray\\Di\\Mock\\UserDb")?;
        let user = ObjectInstance::capture(
            "Ray\\Di\\Mock\\User",
            &serde_json::json!({ "name": "koriym" }),
        )?;
        binder.bind(USER_INTERFACE).to_instance(user)
    }
}

pub struct ArrayInstance;

impl Configure for ArrayInstance {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder
            .bind("")
            .annotated_with("adapters")
            .to_instance(vec!["html", "http"])
    }
}

pub struct InvalidToModule;

impl Configure for InvalidToModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\Invalid Class")
    }
}

pub struct UnknownToModule;

impl Configure for UnknownToModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\NotThere")
    }
}

pub struct InvalidProviderModule;

impl Configure for InvalidProviderModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to_provider("Ray\\Di\\Mock\\UserDb")
    }
}

pub struct AopMatcherModule;

impl Configure for AopMatcherModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind_interceptor(
            Matcher::subclass_of(BILLING_SERVICE),
            Matcher::any(),
            &[TAX_CHARGER],
        )
    }
}

pub struct AopAnyMatcherModule;

impl Configure for AopAnyMatcherModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind_interceptor(Matcher::any(), Matcher::any(), &[TAX_CHARGER])
    }
}

pub struct AopAnnotateMatcherModule;

impl Configure for AopAnnotateMatcherModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind_interceptor(
            Matcher::any(),
            Matcher::annotated_with("Tax"),
            &[TAX_CHARGER],
        )
    }
}

pub struct LoggedAopModule;

impl Configure for LoggedAopModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind_interceptor(
            Matcher::any(),
            Matcher::annotated_with("Tax"),
            &[METHOD_LOGGER],
        )
    }
}

pub struct LayeredAopModule;

impl Configure for LayeredAopModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind_interceptor(Matcher::any(), Matcher::any(), &[TAX_CHARGER])?;
        binder.install_config(&LoggedAopModule)
    }
}

pub struct LogModule;

impl Configure for LogModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\OtherDb")?;
        binder.bind(LOG_INTERFACE).to("Ray\\Di\\Mock\\Log")
    }
}

pub struct InstallModule;

impl Configure for InstallModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\UserDb")?;
        binder.install_config(&LogModule)
    }
}

pub struct FailingInstallModule;

impl Configure for FailingInstallModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder.bind(DB_INTERFACE).to("Ray\\Di\\Mock\\UserDb")?;
        binder.install_config(&InvalidProviderModule)
    }
}

pub struct TimeModule;

impl Configure for TimeModule {
    fn configure(&self, binder: &mut Binder) -> Result<()> {
        binder
            .bind("")
            .annotated_with("time")
            .to_instance(1_356_998_400_i64)
    }
}
