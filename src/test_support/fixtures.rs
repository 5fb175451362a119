//! Manifest fixtures for common test scenarios.

/// One entry importing one vendor chunk.
pub const BASIC_MANIFEST: &str = r#"{
    "main.ts": {"file": "main.abc.js", "isEntry": true, "imports": ["vendor.ts"], "css": ["main.css"]},
    "vendor.ts": {"file": "vendor.def.js", "css": ["vendor.css"]}
}"#;

/// Two entrypoints; inference must refuse to pick one.
pub const MULTI_ENTRY_MANIFEST: &str = r#"{
    "admin.ts": {"file": "assets/admin.js", "isEntry": true, "imports": ["_shared.js"]},
    "_shared.js": {"file": "assets/shared.js"},
    "site.ts": {"file": "assets/site.js", "isEntry": true, "imports": ["_shared.js"]}
}"#;

/// `app` imports `left` and `right`, both import `shared`; `app` also
/// lazily imports `lazy`.
pub const DIAMOND_MANIFEST: &str = r#"{
    "app.ts": {
        "file": "assets/app.js",
        "isEntry": true,
        "imports": ["left.ts", "right.ts"],
        "dynamicImports": ["lazy.ts"],
        "css": ["assets/app.css"],
        "assets": ["assets/logo.svg"]
    },
    "left.ts": {"file": "assets/left.js", "imports": ["shared.ts"], "css": ["assets/left.css"]},
    "right.ts": {
        "file": "assets/right.js",
        "imports": ["shared.ts"],
        "css": ["assets/right.css", "assets/shared.css"]
    },
    "shared.ts": {
        "file": "assets/shared.js",
        "css": ["assets/shared.css"],
        "assets": ["assets/font.woff2", "assets/logo.svg"]
    },
    "lazy.ts": {
        "file": "assets/lazy.js",
        "isDynamicEntry": true,
        "css": ["assets/lazy.css"]
    }
}"#;
