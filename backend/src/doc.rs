//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! request and response bodies, the domain error wrappers from
//! [`crate::inbound::http::schemas`], and the session cookie security
//! scheme. Swagger UI serves it in debug builds and `openapi-dump` prints it
//! for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::questionnaire::{
    AnswerKindDto, AnswerValue, AssessmentRequest, AssessmentResponse, QuestionResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CredentialsRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/users or POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Risk appetite API",
        description = "Questionnaire scoring for signed-in users, account registration, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::questionnaire::list_questions,
        crate::inbound::http::questionnaire::create_assessment,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CredentialsRequest,
        UserResponse,
        QuestionResponse,
        AnswerKindDto,
        AnswerValue,
        AssessmentRequest,
        AssessmentResponse,
    )),
    tags(
        (name = "questionnaire", description = "Catalogue and scoring"),
        (name = "users", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
