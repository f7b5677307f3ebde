pub const LOCAL_CONFIG_FILE: &str = "ttpgcfg.local.json";
pub const PROJECT_CONFIG_FILE: &str = "ttpgcfg.project.json";
pub const MANIFEST_FILE: &str = "Manifest.json";
pub const THUMBNAIL_FILE: &str = "Thumbnail.png";

pub const ASSETS_DIR: &str = "assets";
pub const SOURCE_DIR: &str = "src";
pub const BUILD_DIR: &str = "build";
pub const DEV_DIR: &str = "dev";
pub const BUNDLE_DIR: &str = "lib";
pub const BUNDLER_CONFIG_FILE: &str = "rollup.config.js";

pub const SCRIPTS_DIR: &str = "Scripts";
pub const DEPENDENCIES_DIR: &str = "node_modules";
pub const TEMPLATES_DIR: &str = "Templates";

/// Suffix of the development package directory under the host path.
pub const DEV_SUFFIX: &str = "_dev";

/// Field of a template document naming the script attached to it.
pub const SCRIPT_NAME_FIELD: &str = "ScriptName";

/// Module the host injects at runtime; never bundled.
pub const HOST_SCRIPTING_API: &str = "@tabletop-playground/api";

pub const DEFAULT_VERSION: &str = "0.0.1";

/// Asset categories the host discovers inside a package directory.
pub const ASSET_CATEGORIES: [&str; 7] = [
  "Fonts",
  "Models",
  "Sounds",
  "States",
  "Templates",
  "Textures",
  "Thumbnails",
];
