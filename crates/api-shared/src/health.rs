use crate::responses::HealthRes;

/// Liveness check served by the REST API at `/health`.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MRAS is alive".into(),
        }
    }
}
