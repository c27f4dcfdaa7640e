#![no_main]

use libfuzzer_sys::fuzz_target;
use viewcache::{DirectiveCompiler, TemplateCompiler};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Compiling and rendering must never panic
        if let Ok(compiled) = DirectiveCompiler::new().compile(source) {
            let model = serde_json::json!({"Name": "<x>", "items": [1, 2], "nested": {"a": null}});
            let _ = compiled.artifact.render(&model);
            let _ = compiled.artifact.bindings();
        }
    }
});
