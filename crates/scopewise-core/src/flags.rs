//! Closed boolean-set categories of the requirements record.
//!
//! Every category is a fixed struct of named toggles paired with a key enum.
//! The key sets are known at compile time, so adding a capability means adding
//! a line to one of the `flag_set!` invocations below and nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        $set:ident / $key:ident {
            $( $field:ident => $variant:ident, $wire:literal, $label:literal; )+
        }
    ) => {
        #[doc = concat!("Key of a toggle in [`", stringify!($set), "`].")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $key {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $key {
            /// Every key in declaration order.
            pub const ALL: &'static [$key] = &[$($key::$variant),+];

            /// Wire name (camelCase) used in stored rows.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($key::$variant => $wire,)+
                }
            }

            /// Human-readable name used in reports and share templates.
            pub fn label(self) -> &'static str {
                match self {
                    $($key::$variant => $label,)+
                }
            }

            /// Look a key up by its wire name.
            pub fn from_wire(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some($key::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $set {
            $(
                #[serde(rename = $wire)]
                pub $field: bool,
            )+
        }

        impl $set {
            /// Read one toggle.
            pub fn get(&self, key: $key) -> bool {
                match key {
                    $($key::$variant => self.$field,)+
                }
            }

            /// Set one toggle.
            pub fn set(&mut self, key: $key, enabled: bool) {
                match key {
                    $($key::$variant => self.$field = enabled,)+
                }
            }

            /// Builder-style variant of [`Self::set`].
            pub fn with(mut self, key: $key, enabled: bool) -> Self {
                self.set(key, enabled);
                self
            }

            /// All toggles in declaration order.
            pub fn iter(&self) -> impl Iterator<Item = ($key, bool)> + '_ {
                $key::ALL.iter().map(move |k| (*k, self.get(*k)))
            }

            /// Keys that are switched on, in declaration order.
            pub fn enabled(&self) -> Vec<$key> {
                self.iter().filter(|(_, on)| *on).map(|(k, _)| k).collect()
            }

            /// Labels of the keys that are switched on.
            pub fn enabled_labels(&self) -> Vec<&'static str> {
                self.enabled().into_iter().map($key::label).collect()
            }

            pub fn count_enabled(&self) -> usize {
                self.iter().filter(|(_, on)| *on).count()
            }

            pub fn any_enabled(&self) -> bool {
                self.count_enabled() > 0
            }
        }

        impl FromIterator<$key> for $set {
            fn from_iter<I: IntoIterator<Item = $key>>(iter: I) -> Self {
                let mut set = Self::default();
                for key in iter {
                    set.set(key, true);
                }
                set
            }
        }
    };
}

flag_set! {
    /// Platform components the project needs. These are the priced items of
    /// the cost model.
    FeatureFlags / Feature {
        lakehouse => Lakehouse, "lakehouse", "Lakehouse";
        data_warehouse => DataWarehouse, "dataWarehouse", "Data Warehouse";
        real_time_analytics => RealTimeAnalytics, "realTimeAnalytics", "Real-Time Analytics";
        data_factory => DataFactory, "dataFactory", "Data Factory (Pipelines)";
        data_science => DataScience, "dataScience", "Data Science & ML Workspace";
        business_intelligence => BusinessIntelligence, "businessIntelligence", "Business Intelligence & Reporting";
    }
}

flag_set! {
    /// Shapes of data the platform has to store.
    DataTypeFlags / DataType {
        structured => Structured, "structured", "Structured";
        semi_structured => SemiStructured, "semiStructured", "Semi-structured (JSON, XML)";
        unstructured => Unstructured, "unstructured", "Unstructured (documents, media)";
        streaming => Streaming, "streaming", "Streaming events";
        geospatial => Geospatial, "geospatial", "Geospatial";
    }
}

flag_set! {
    /// Systems the platform ingests from.
    DataSourceFlags / DataSource {
        relational_databases => RelationalDatabases, "relationalDatabases", "Relational databases";
        files => Files, "files", "Files & data lakes";
        apis => Apis, "apis", "REST / GraphQL APIs";
        saas_applications => SaasApplications, "saasApplications", "SaaS applications";
        iot_devices => IotDevices, "iotDevices", "IoT devices";
        on_premises_systems => OnPremisesSystems, "onPremisesSystems", "On-premises systems";
    }
}

flag_set! {
    /// Data governance capabilities.
    GovernanceFlags / GovernanceCapability {
        data_catalog => DataCatalog, "dataCatalog", "Data catalog";
        lineage => Lineage, "lineage", "Lineage tracking";
        quality_monitoring => QualityMonitoring, "qualityMonitoring", "Data quality monitoring";
        access_policies => AccessPolicies, "accessPolicies", "Fine-grained access policies";
        compliance_reporting => ComplianceReporting, "complianceReporting", "Compliance reporting";
        data_masking => DataMasking, "dataMasking", "Data masking";
    }
}

flag_set! {
    /// Analytics capabilities offered to end users.
    AnalyticsFlags / AnalyticsCapability {
        dashboards => Dashboards, "dashboards", "Interactive dashboards";
        ad_hoc_queries => AdHocQueries, "adHocQueries", "Ad-hoc queries";
        machine_learning => MachineLearning, "machineLearning", "Machine learning";
        predictive_analytics => PredictiveAnalytics, "predictiveAnalytics", "Predictive analytics";
        natural_language_query => NaturalLanguageQuery, "naturalLanguageQuery", "Natural-language query";
        embedded_analytics => EmbeddedAnalytics, "embeddedAnalytics", "Embedded analytics";
    }
}

flag_set! {
    /// Supported authentication methods.
    AuthenticationFlags / AuthenticationMethod {
        single_sign_on => SingleSignOn, "singleSignOn", "Single sign-on";
        multi_factor => MultiFactor, "multiFactor", "Multi-factor authentication";
        directory_integration => DirectoryIntegration, "directoryIntegration", "Directory integration";
        api_keys => ApiKeys, "apiKeys", "API keys / service principals";
    }
}

flag_set! {
    /// Custom development work on top of the platform.
    CustomDevelopmentFlags / CustomDevelopment {
        custom_connectors => CustomConnectors, "customConnectors", "Custom connectors";
        custom_visualizations => CustomVisualizations, "customVisualizations", "Custom visualizations";
        api_development => ApiDevelopment, "apiDevelopment", "API development";
        workflow_automation => WorkflowAutomation, "workflowAutomation", "Workflow automation";
    }
}

impl Feature {
    /// List price of the component in currency units.
    pub fn price(self) -> u32 {
        match self {
            Feature::Lakehouse => 500,
            Feature::DataWarehouse => 800,
            Feature::RealTimeAnalytics => 1200,
            Feature::DataFactory => 300,
            Feature::DataScience => 400,
            Feature::BusinessIntelligence => 600,
        }
    }
}
