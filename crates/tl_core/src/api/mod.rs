pub mod league_json;

pub use league_json::{
    create_or_update_lineup_json, publish_lineup_json, standings_json, upsert_point_system_json,
    API_SCHEMA_VERSION,
};
