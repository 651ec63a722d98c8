// Copyright (C) 2026  ACAI Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Profile configuration for ACAI
//!
//! Profiles live in INI files, one section per target environment. Keys set
//! under `[DEFAULT]` apply to every section that does not set them:
//!
//! ```ini
//! [DEFAULT]
//! api_key = 1a2b3c
//! api_secret = ...
//!
//! [prod]
//! application = a47ac10b-58cc-4372-a567-0e02b2c3d479
//! acquia_environment = prod
//! cert_name = www.example.gov
//! ```
//!
//! Files are layered (`/etc/acai.conf`, then `~/.acai.conf`, then any
//! explicit `--config` file); later layers override earlier ones key by key.
//! `ACAI_*` environment variables override the merged result.
//!
//! # Example
//!
//! ```no_run
//! use acai_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ConfigLoader::new().resolve("prod").await?;
//!     println!("Certificates for {}", settings.profile.cert_name);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLayer, ConfigLoader, SYSTEM_CONFIG_PATH, USER_CONFIG_FILE};
pub use schema::{
    ConfigFile, Endpoints, Profile, ProfileSection, Settings, DEFAULT_API_BASE_URL,
    DEFAULT_AUTH_URL, DEFAULT_LE_ROOT, DEFAULT_SECTION,
};
pub use validation::Validator;
