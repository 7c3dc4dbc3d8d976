/// GET /healthz - liveness probe.
pub async fn healthz() -> &'static str {
    "Ok"
}
