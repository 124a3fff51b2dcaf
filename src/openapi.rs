use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{ClassifyRequest, Meeting, MeetingBoard, MeetingView, RejectedMeeting};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_board,
        crate::handlers::get_meeting,
        crate::handlers::classify_meetings,
        crate::handlers::get_ical
    ),
    components(schemas(Meeting, MeetingView, MeetingBoard, RejectedMeeting, ClassifyRequest)),
    tags(
        (name = "meetings", description = "Meeting board operations")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
