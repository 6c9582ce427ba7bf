#![forbid(unsafe_code)]

pub mod chat_service;
pub mod config;
pub mod dashboard_services;
pub mod endpoints;
pub mod error;
pub mod exam_service;
pub mod forum_service;
pub mod job_service;
pub mod normalize;
pub mod progress_service;
pub mod query_client;
pub mod response;
pub mod stub;
pub mod transport;

pub use noun_core::Clock;

pub use chat_service::{ChatService, SendOutcome};
pub use config::ApiConfig;
pub use dashboard_services::DashboardServices;
pub use endpoints::{Endpoint, fallback_body};
pub use error::{ApiError, ChatError, ConfigError, TransportError};
pub use exam_service::{ExamService, UpcomingExam};
pub use forum_service::ForumService;
pub use job_service::JobService;
pub use progress_service::{ProgressOverview, ProgressService};
pub use query_client::QueryClient;
pub use stub::StubTransport;
pub use transport::{ApiRequest, HttpMethod, HttpResponse, ReqwestTransport, Transport};
