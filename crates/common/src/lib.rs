pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_serializes_status_and_service() {
        let h = types::Health::healthy("celulares-api");
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "celulares-api");
        assert!(json["timestamp"].is_string());
    }
}
