//! Application entity <-> representation conversion.

use crate::api::dto::{self, Application, ApplicationInput, Log, Member, NotificationSetting};
use crate::api::error::ApiError;
use crate::domain::{
    ApplicationEntity, ApplicationLogEntity, ApplicationSettings, MemberEntity,
    NotificationSettingEntity, OAuthClientSettings, SimpleApplicationSettings,
    UpdateApplicationEntity,
};

pub fn convert_application(entity: &ApplicationEntity) -> Application {
    Application {
        id: entity.id.to_string(),
        name: entity.name.clone(),
        description: entity.description.clone(),
        application_type: entity.application_type.clone(),
        status: entity.status.clone(),
        groups: entity.groups.iter().cloned().collect(),
        owner: entity.primary_owner.to_string(),
        settings: entity.settings.as_ref().map(convert_settings),
        has_picture: entity.picture.is_some(),
        created_at: entity.created_at,
        updated_at: entity.updated_at,
        links: None,
    }
}

fn convert_settings(settings: &ApplicationSettings) -> dto::ApplicationSettings {
    match settings {
        ApplicationSettings::Simple(simple) => dto::ApplicationSettings {
            app: Some(dto::SimpleApplicationSettings {
                app_type: simple.app_type.clone(),
                client_id: simple.client_id.clone(),
            }),
            oauth: None,
        },
        ApplicationSettings::OAuth(oauth) => dto::ApplicationSettings {
            app: None,
            oauth: Some(dto::OAuthClientSettings {
                application_type: oauth.application_type.clone(),
                client_id: oauth.client_id.clone(),
                client_secret: oauth.client_secret.clone(),
                client_uri: oauth.client_uri.clone(),
                grant_types: oauth.grant_types.clone(),
                logo_uri: oauth.logo_uri.clone(),
                redirect_uris: oauth.redirect_uris.clone(),
                renew_client_secret_supported: Some(oauth.renew_client_secret_supported),
                response_types: oauth.response_types.clone(),
            }),
        },
    }
}

/// Domain settings for an update payload.
///
/// Fails when both variants are sent, or when the OAuth variant omits
/// `renew_client_secret_supported`. An empty settings object means "no settings".
pub fn settings_from_input(
    settings: Option<&dto::ApplicationSettings>,
) -> Result<Option<ApplicationSettings>, ApiError> {
    let Some(settings) = settings else {
        return Ok(None);
    };

    match (&settings.app, &settings.oauth) {
        (Some(_), Some(_)) => Err(ApiError::bad_request(
            "Application settings must contain either 'app' or 'oauth', not both",
        )),
        (Some(app), None) => Ok(Some(ApplicationSettings::Simple(SimpleApplicationSettings {
            client_id: app.client_id.clone(),
            app_type: app.app_type.clone(),
        }))),
        (None, Some(oauth)) => {
            let renew_client_secret_supported = oauth.renew_client_secret_supported.ok_or_else(|| {
                ApiError::bad_request("'renew_client_secret_supported' is required for OAuth settings")
            })?;
            Ok(Some(ApplicationSettings::OAuth(OAuthClientSettings {
                application_type: oauth.application_type.clone(),
                client_id: oauth.client_id.clone(),
                client_secret: oauth.client_secret.clone(),
                client_uri: oauth.client_uri.clone(),
                grant_types: oauth.grant_types.clone(),
                logo_uri: oauth.logo_uri.clone(),
                redirect_uris: oauth.redirect_uris.clone(),
                renew_client_secret_supported,
                response_types: oauth.response_types.clone(),
            })))
        }
        (None, None) => Ok(None),
    }
}

/// Replacement payload built from a validated body; the picture is carried over.
pub fn update_from_input(
    input: ApplicationInput,
    settings: Option<ApplicationSettings>,
    current: &ApplicationEntity,
) -> UpdateApplicationEntity {
    UpdateApplicationEntity {
        name: input.name,
        description: input.description,
        groups: input.groups.into_iter().collect(),
        settings,
        picture: current.picture.clone(),
    }
}

pub fn convert_member(entity: &MemberEntity) -> Member {
    Member {
        id: entity.user.to_string(),
        display_name: entity.display_name.clone(),
        role: entity.role.clone(),
        created_at: entity.created_at,
    }
}

pub fn convert_notification_setting(entity: &NotificationSettingEntity) -> NotificationSetting {
    NotificationSetting {
        name: entity.name.clone(),
        config_type: entity.config_type.clone(),
        hooks: entity.hooks.clone(),
        use_system_proxy: entity.use_system_proxy,
    }
}

pub fn convert_log(entity: &ApplicationLogEntity) -> Log {
    Log {
        id: entity.id.clone(),
        timestamp: entity.timestamp,
        api: entity.api.to_string(),
        plan: entity.plan.as_ref().map(|plan| plan.to_string()),
        method: entity.method.clone(),
        path: entity.path.clone(),
        status: entity.status,
        response_time: entity.response_time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationId, UserId};
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn entity() -> ApplicationEntity {
        ApplicationEntity {
            id: ApplicationId::from("app-1"),
            name: "My app".into(),
            description: Some("desc".into()),
            groups: BTreeSet::from(["g1".to_string()]),
            primary_owner: UserId::from("owner"),
            settings: Some(ApplicationSettings::OAuth(OAuthClientSettings {
                client_id: Some("cid".into()),
                grant_types: vec!["client_credentials".into()],
                renew_client_secret_supported: true,
                ..Default::default()
            })),
            application_type: "WEB".into(),
            status: "ACTIVE".into(),
            picture: Some("data:image/png;base64,AQID".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_convert_application_exposes_exactly_one_settings_variant() {
        let app = convert_application(&entity());
        assert_eq!(app.owner, "owner");
        assert_eq!(app.groups, vec!["g1".to_string()]);
        assert!(app.has_picture);

        let settings = app.settings.expect("settings");
        assert!(settings.app.is_none());
        let oauth = settings.oauth.expect("oauth variant");
        assert_eq!(oauth.client_id.as_deref(), Some("cid"));
        assert_eq!(oauth.renew_client_secret_supported, Some(true));
    }

    #[test]
    fn test_settings_with_both_variants_are_rejected() {
        let settings = dto::ApplicationSettings {
            app: Some(dto::SimpleApplicationSettings::default()),
            oauth: Some(dto::OAuthClientSettings {
                renew_client_secret_supported: Some(false),
                ..Default::default()
            }),
        };
        assert!(matches!(settings_from_input(Some(&settings)), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_oauth_settings_require_renew_flag() {
        let settings = dto::ApplicationSettings {
            app: None,
            oauth: Some(dto::OAuthClientSettings::default()),
        };
        assert!(matches!(settings_from_input(Some(&settings)), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_absent_or_empty_settings_are_valid() {
        assert_eq!(settings_from_input(None), Ok(None));
        assert_eq!(settings_from_input(Some(&dto::ApplicationSettings::default())), Ok(None));
    }

    #[test]
    fn test_simple_settings_round_into_domain() {
        let settings = dto::ApplicationSettings {
            app: Some(dto::SimpleApplicationSettings {
                app_type: Some("web".into()),
                client_id: Some("my-client".into()),
            }),
            oauth: None,
        };
        assert_eq!(
            settings_from_input(Some(&settings)),
            Ok(Some(ApplicationSettings::Simple(SimpleApplicationSettings {
                client_id: Some("my-client".into()),
                app_type: Some("web".into()),
            })))
        );
    }

    #[test]
    fn test_update_carries_picture_forward() {
        let current = entity();
        let input = ApplicationInput {
            id: "app-1".into(),
            name: "Renamed".into(),
            description: None,
            groups: vec!["g2".into()],
            settings: None,
        };
        let update = update_from_input(input, None, &current);
        assert_eq!(update.name, "Renamed");
        assert_eq!(update.description, None);
        assert_eq!(update.groups, BTreeSet::from(["g2".to_string()]));
        assert_eq!(update.picture, current.picture);
    }
}
