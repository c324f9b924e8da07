use crate::core::command::{CommandContext, O365Command};
use crate::core::request::{RequestDescriptor, SPO_ACCEPT};
use crate::core::validation::{is_valid_guid, resource_from_url, validate_sharepoint_url};
use crate::domain::error::{CliError, CliResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

/// Scope of an app catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppCatalogScope {
    #[default]
    Tenant,
    SiteCollection,
}

impl AppCatalogScope {
    /// Parse a scope name, case-insensitively
    pub fn parse(value: &str) -> CliResult<Self> {
        match value.to_lowercase().as_str() {
            "tenant" => Ok(Self::Tenant),
            "sitecollection" => Ok(Self::SiteCollection),
            _ => Err(CliError::validation(
                "Scope must be either 'tenant' or 'sitecollection'",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::SiteCollection => "sitecollection",
        }
    }
}

impl fmt::Display for AppCatalogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gets information about an app from the tenant or a site collection app catalog
#[derive(Debug, Clone, Default)]
pub struct AppGet {
    pub id: Option<String>,
    pub name: Option<String>,
    pub app_catalog_url: Option<String>,
    pub scope: Option<String>,
}

/// How the app is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppIdentifier<'a> {
    Id(&'a str),
    Name(&'a str),
}

#[derive(Debug, Deserialize)]
struct TenantSettings {
    #[serde(rename = "CorporateCatalogUrl")]
    corporate_catalog_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppFile {
    #[serde(rename = "UniqueId")]
    unique_id: String,
}

impl AppGet {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_app_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.app_catalog_url = Some(url.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Resolved scope, `tenant` when none was given
    pub fn scope(&self) -> CliResult<AppCatalogScope> {
        match non_empty(&self.scope) {
            Some(scope) => AppCatalogScope::parse(scope),
            None => Ok(AppCatalogScope::default()),
        }
    }

    /// Validate the options and return how the app is identified
    pub fn identifier(&self) -> CliResult<AppIdentifier<'_>> {
        if self.scope()? == AppCatalogScope::SiteCollection && non_empty(&self.app_catalog_url).is_none() {
            return Err(CliError::validation(
                "You must specify appCatalogUrl when the scope is sitecollection",
            ));
        }

        let identifier = match (non_empty(&self.id), non_empty(&self.name)) {
            (None, None) => {
                return Err(CliError::validation("Specify either the id or the name"));
            }
            (Some(_), Some(_)) => {
                return Err(CliError::validation(
                    "Specify either the id or the name but not both",
                ));
            }
            (Some(id), None) => {
                if !is_valid_guid(id) {
                    return Err(CliError::validation(format!("{} is not a valid GUID", id)));
                }
                AppIdentifier::Id(id)
            }
            (None, Some(name)) => AppIdentifier::Name(name),
        };

        if let Some(url) = non_empty(&self.app_catalog_url) {
            validate_sharepoint_url(url).map_err(CliError::Validation)?;
        }

        Ok(identifier)
    }

    /// Resolve the URL of the app catalog site
    ///
    /// A site collection catalog URL may be given with or without its
    /// `AppCatalog` library segment. Without an explicit URL the tenant app
    /// catalog is looked up through the tenant settings of `site_url`.
    pub async fn app_catalog_site_url(
        &self,
        ctx: &CommandContext,
        site_url: &str,
        access_token: &str,
    ) -> CliResult<String> {
        let scope = self.scope()?;

        if let Some(url) = non_empty(&self.app_catalog_url) {
            if scope == AppCatalogScope::SiteCollection {
                return Ok(strip_app_catalog_segment(url));
            }
            return Ok(url.trim_end_matches('/').to_string());
        }

        info!("No app catalog URL specified. Looking up tenant app catalog...");
        let request = RequestDescriptor::get(format!(
            "{}/_api/SP_TenantSettings_Current",
            site_url.trim_end_matches('/')
        ))
        .bearer(access_token)
        .accept(SPO_ACCEPT);

        let settings: TenantSettings = ctx.execute_json(&request).await?;
        match settings.corporate_catalog_url {
            Some(url) if !url.is_empty() => {
                info!(url = %url, "Found tenant app catalog");
                Ok(url.trim_end_matches('/').to_string())
            }
            _ => Err(CliError::command(
                "Tenant app catalog URL not found. Specify the URL of the app catalog site using the appCatalogUrl option.",
            )),
        }
    }

    fn lookup_request(catalog_url: &str, name: &str, access_token: &str) -> RequestDescriptor {
        let escaped = urlencoding::encode(&name.replace('\'', "''")).into_owned();
        RequestDescriptor::get(format!(
            "{}/_api/web/getfolderbyserverrelativeurl('AppCatalog')/files('{}')?$select=UniqueId",
            catalog_url, escaped
        ))
        .bearer(access_token)
        .accept(SPO_ACCEPT)
    }

    fn metadata_request(
        catalog_url: &str,
        scope: AppCatalogScope,
        id: &str,
        access_token: &str,
    ) -> RequestDescriptor {
        RequestDescriptor::get(format!(
            "{}/_api/web/{}appcatalog/AvailableApps/GetById('{}')",
            catalog_url,
            scope,
            urlencoding::encode(id)
        ))
        .bearer(access_token)
        .accept(SPO_ACCEPT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn strip_app_catalog_segment(url: &str) -> String {
    let lower = url.to_lowercase();
    let trimmed = lower.trim_end_matches('/');
    trimmed
        .strip_suffix("/appcatalog")
        .unwrap_or(trimmed)
        .to_string()
}

#[async_trait]
impl O365Command for AppGet {
    fn name(&self) -> &'static str {
        "spo app-get"
    }

    fn description(&self) -> &'static str {
        "Gets information about the specific app from the specified app catalog"
    }

    fn validate(&self) -> CliResult<()> {
        self.identifier().map(|_| ())
    }

    async fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let identifier = self.identifier()?;
        let scope = self.scope()?;

        let connection = ctx.auth.connection().await;
        let site_url = connection
            .site_url
            .ok_or_else(|| CliError::auth("Log in to SharePoint Online first"))?;

        let access_token = ctx
            .auth
            .ensure_access_token(&resource_from_url(&site_url))
            .await?;
        let catalog_url = self.app_catalog_site_url(ctx, &site_url, &access_token).await?;

        let resource = resource_from_url(&catalog_url);
        let refresh_token = connection
            .refresh_token
            .as_deref()
            .unwrap_or_default();
        let site_access_token = ctx.auth.get_access_token(&resource, refresh_token).await?;
        debug!(resource = %resource, "Retrieved access token");

        let app_id = match identifier {
            AppIdentifier::Id(id) => id.to_string(),
            AppIdentifier::Name(name) => {
                info!("Looking up app id for app named {}...", name);
                let request = Self::lookup_request(&catalog_url, name, &site_access_token);
                let file: AppFile = ctx.execute_json(&request).await?;
                file.unique_id
            }
        };

        info!("Retrieving information for app {}...", app_id);
        let request = Self::metadata_request(&catalog_url, scope, &app_id, &site_access_token);
        ctx.execute_request(&request).await
    }
}
