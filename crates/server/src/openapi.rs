use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDoc {
    pub person_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// `dateTime` and `duration` are accepted as input aliases.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeDoc {
    pub person_id: i32,
    pub start: DateTime<Utc>,
    pub duration_minutes: i32,
}

/// `dateTime` and `duration` are accepted as input aliases.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDoc {
    pub appointment_id: i32,
    pub start: DateTime<Utc>,
    pub duration_minutes: i32,
    pub person_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::persons::list_persons,
        crate::routes::persons::get_person,
        crate::routes::availability::list_availability,
        crate::routes::availability::list_availability_for_person,
        crate::routes::appointments::list_appointments,
        crate::routes::appointments::get_appointment,
        crate::routes::appointments::create_appointment,
        crate::routes::appointments::update_appointment,
    ),
    components(
        schemas(
            HealthResponse,
            PersonDoc,
            AvailableTimeDoc,
            AppointmentDoc,
            ErrorDoc,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "persons"),
        (name = "availability"),
        (name = "appointments")
    )
)]
pub struct ApiDoc;
