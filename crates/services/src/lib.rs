pub mod history_export;
pub mod settings_store;

pub use history_export::{export_history_csv, export_history_to_path, history_csv_bytes};
pub use settings_store::{
    config_path, load_settings_or_default, lookup_api_key, save_settings, ApiKey,
    CredentialSource,
};
