pub mod llm_service;
pub mod proper_names;

pub use llm_service::{
    build_definition_request, parse_definition_response, ChatTransport, DefinitionRequest,
    DefinitionService, OpenAiTransport,
};
pub use proper_names::ProperNameFilter;
