//! End-to-end tests: parse, run the lazy component pass, print.

use lazy_compiler::lazy::diagnostics::ErrorCode;
use lazy_compiler::lazy::logging::{CapturingLogger, LogLevel, NullLogger};
use lazy_compiler::{
    transform_module, ComponentExport, ModuleConvention, TransformError, TransformOptions,
    TransformOutput,
};

/// Printer output is compared without whitespace and with normalized quotes.
fn squash(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('\'', "\"")
}

fn transform(source: &str, options: &TransformOptions) -> TransformOutput {
    transform_module(source, "cmp-a.tsx", options, &NullLogger).expect("transform")
}

fn assert_output(source: &str, options: &TransformOptions, expected: &str) {
    let output = transform(source, options);
    assert_eq!(squash(&output.code), squash(expected), "\n{}", output.code);
}

const REGISTER_IMPORT: &str =
    "import { registerInstance as __stencil_registerInstance } from '@stencil/core';";

#[test]
fn registers_component_without_members() {
    let source = r#"
        import { Component } from '@stencil/core';
        @Component({ tag: 'cmp-a' })
        export class CmpA {}
    "#;
    assert_output(
        source,
        &TransformOptions::default(),
        &format!(
            "{}
            export const CmpA = class {{
                constructor(hostRef) {{
                    __stencil_registerInstance(this, hostRef);
                }}
            }};",
            REGISTER_IMPORT
        ),
    );

    let output = transform(source, &TransformOptions::default());
    assert_eq!(output.report.components.len(), 1);
    assert_eq!(output.report.components[0].class_name, "CmpA");
    assert_eq!(output.report.components[0].tag, "cmp-a");
    assert!(output.report.diagnostics.is_empty());
}

#[test]
fn attaches_internals_for_form_associated_component() {
    let source = r#"
        import { Component, AttachInternals } from '@stencil/core';
        @Component({ tag: 'cmp-a', formAssociated: true })
        export class CmpA {
            @AttachInternals() internals;
        }
    "#;
    assert_output(
        source,
        &TransformOptions::default(),
        &format!(
            r#"{}
            export const CmpA = class {{
                constructor(hostRef) {{
                    __stencil_registerInstance(this, hostRef);
                    if (hostRef.$hostElement$["s-ei"]) {{
                        this.internals = hostRef.$hostElement$["s-ei"];
                    }} else {{
                        this.internals = hostRef.$hostElement$.attachInternals();
                        hostRef.$hostElement$["s-ei"] = this.internals;
                    }}
                }}
                static get formAssociated() {{
                    return true;
                }}
            }};"#,
            REGISTER_IMPORT
        ),
    );
}

#[test]
fn checks_internals_cache_before_attaching() {
    let source = r#"
        @Component({ tag: 'cmp-a', formAssociated: true })
        class CmpA { @AttachInternals() internals; }
    "#;
    let code = squash(&transform(source, &TransformOptions::default()).code);
    let check = code.find("if(hostRef.$hostElement$[\"s-ei\"])").expect("cache check");
    let attach = code.find("attachInternals()").expect("attach call");

    assert!(check < attach);
    assert_eq!(code.matches("attachInternals()").count(), 1);
    assert!(!code.contains("@AttachInternals"));
}

#[test]
fn replaces_element_field_with_getter() {
    let source = r#"
        import { Component, Element, h } from '@stencil/core';
        @Component({ tag: 'cmp-a' })
        export class CmpA {
            @Element() el: HTMLElement;
            render() { return h('div'); }
        }
    "#;
    assert_output(
        source,
        &TransformOptions::default(),
        r#"import {
                registerInstance as __stencil_registerInstance,
                getElement as __stencil_getElement
            } from "@stencil/core";
            import { h } from "@stencil/core";
            export const CmpA = class {
                constructor(hostRef) {
                    __stencil_registerInstance(this, hostRef);
                }
                render() {
                    return h("div");
                }
                get el() {
                    return __stencil_getElement(this);
                }
            };"#,
    );
}

#[test]
fn keeps_existing_constructor_statements_after_registration() {
    let source = r#"
        @Component({ tag: 'cmp-a' })
        export class CmpA {
            count = 0;
            constructor(private readonly service) {
                this.count = 1;
                this.ready();
            }
            ready() {}
        }
    "#;
    let code = squash(&transform(source, &TransformOptions::default()).code);

    assert!(code.contains(
        "count=0;constructor(hostRef){__stencil_registerInstance(this,hostRef);this.count=1;this.ready();}ready(){}"
    ));
    assert_eq!(code.matches("constructor(").count(), 1);
}

#[test]
fn keeps_declaration_for_commonjs() {
    let source = r#"
        import { Component } from '@stencil/core';
        @Component({ tag: 'cmp-a', styleUrls: ['./foo/bar.css', './bar/foo.css'] })
        export class CmpA {}
    "#;
    assert_output(
        source,
        &TransformOptions::default().with_module(ModuleConvention::Cjs),
        r#"const CMP_A__foo_bar_css = require("./foo/bar.css");
            const CMP_A__bar_foo_css = require("./bar/foo.css");
            const { registerInstance: __stencil_registerInstance } = require("@stencil/core");
            export class CmpA {
                constructor(hostRef) {
                    __stencil_registerInstance(this, hostRef);
                }
            }
            CmpA.style = CMP_A__foo_bar_css + CMP_A__bar_foo_css;"#,
    );
}

#[test]
fn drops_export_for_custom_elements() {
    let source = "@Component({ tag: 'cmp-a' }) export class CmpA {}";
    let options = TransformOptions::default().with_component_export(ComponentExport::CustomElement);

    assert_output(
        source,
        &options,
        &format!(
            "{}
            const CmpA = class {{
                constructor(hostRef) {{
                    __stencil_registerInstance(this, hostRef);
                }}
            }};",
            REGISTER_IMPORT
        ),
    );

    let cjs = options.with_module(ModuleConvention::Cjs);
    let code = squash(&transform(source, &cjs).code);
    assert!(code.contains("classCmpA{"));
    assert!(!code.contains("export"));
}

#[test]
fn keeps_default_export_declaration() {
    let source = "@Component({ tag: 'cmp-a', styleUrl: 'a.css' }) export default class CmpA {}";
    assert_output(
        source,
        &TransformOptions::default(),
        &format!(
            "{}
            import CMP_A__a_css from 'a.css';
            export default class CmpA {{
                constructor(hostRef) {{
                    __stencil_registerInstance(this, hostRef);
                }}
            }}
            CmpA.style = CMP_A__a_css;",
            REGISTER_IMPORT
        ),
    );
}

#[test]
fn uses_configured_core_import_path() {
    let source = r#"
        import { Component } from '@my/runtime';
        @Component({ tag: 'cmp-a' })
        class CmpA {}
    "#;
    let options = TransformOptions::from_json(r#"{ "coreImportPath": "@my/runtime" }"#).unwrap();
    let code = squash(&transform(source, &options).code);

    assert!(code.starts_with(
        "import{registerInstanceas__stencil_registerInstance}from\"@my/runtime\";constCmpA=class{"
    ));
    assert!(!code.contains("Component"));
}

#[test]
fn leaves_untagged_classes_untouched() {
    let source = r#"
        import { Component } from '@stencil/core';
        export class Plain { value = 1; }
        @Component({ styleUrls: ['./a.css'] })
        export class Broken {}
    "#;
    let logger = CapturingLogger::new(LogLevel::Warn);
    let output = transform_module(source, "broken.ts", &TransformOptions::default(), &logger).unwrap();

    assert_eq!(output.code, source);
    assert!(output.report.components.is_empty());
    assert_eq!(output.report.diagnostics.len(), 1);
    assert_eq!(output.report.diagnostics[0].code, ErrorCode::ComponentMissingTag);
    assert!(output.report.has_errors());
    assert_eq!(logger.messages_at(LogLevel::Error).len(), 1);
}

#[test]
fn rewrites_valid_classes_next_to_skipped_ones() {
    let source = r#"
        import { Component } from '@stencil/core';
        @Component({ tag: 'cmp-a' })
        export class CmpA {}
        @Component({})
        export class Broken {}
    "#;
    let output = transform(source, &TransformOptions::default());
    let code = squash(&output.code);

    assert_eq!(output.report.components.len(), 1);
    assert!(code.contains("import{Component}from\"@stencil/core\";"));
    assert!(code.contains("@Component({})"));
    assert!(code.contains("classBroken{}"));
    assert!(code.contains("exportconstCmpA=class{"));
}

#[test]
fn second_run_is_a_no_op() {
    let source = r#"
        import { Component, Element } from '@stencil/core';
        @Component({ tag: 'cmp-a', styleUrls: { ios: './ios.css', md: './md.css' }, formAssociated: true })
        export class CmpA {
            @Element() el;
            @AttachInternals() internals;
        }
    "#;
    for options in [
        TransformOptions::default(),
        TransformOptions::default().with_module(ModuleConvention::Cjs),
    ] {
        let first = transform(source, &options);
        let second = transform(&first.code, &options);

        assert_eq!(second.code, first.code);
        assert!(second.report.components.is_empty());
    }
}

#[test]
fn reports_parse_errors() {
    let err = transform_module("class {", "broken.ts", &TransformOptions::default(), &NullLogger)
        .unwrap_err();

    match err {
        TransformError::Parse { file, .. } => assert_eq!(file, "broken.ts"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn warns_on_non_literal_form_associated() {
    let source = "@Component({ tag: 'cmp-a', formAssociated: FORM }) class CmpA {}";
    let logger = CapturingLogger::new(LogLevel::Warn);
    let output = transform_module(source, "cmp-a.ts", &TransformOptions::default(), &logger).unwrap();

    assert!(!squash(&output.code).contains("formAssociated"));
    assert_eq!(output.report.diagnostics[0].code, ErrorCode::ValueNotLiteral);
    assert!(!output.report.has_errors());
    assert_eq!(logger.messages_at(LogLevel::Warn).len(), 1);
}

#[test]
fn keeps_header_and_member_comments() {
    let source = "/** license */
// note about x
@Component({ tag: 'cmp-a' })
export class CmpA {
    // keep me
    @Element() el;
    /* in ctor */ constructor() {
        /* body */
        this.x = 1;
    }
    // before render
    render() {}
}
";
    let output = transform(source, &TransformOptions::default());
    let code = output.code;

    for comment in ["/** license */", "// note about x", "// keep me", "/* in ctor */", "/* body */", "// before render"] {
        assert_eq!(code.matches(comment).count(), 1, "{} in\n{}", comment, code);
    }
    let position = |needle: &str| code.find(needle).unwrap_or_else(|| panic!("{} in\n{}", needle, code));
    assert!(position("/** license */") < position("import"));
    assert!(position("// note about x") < position("export const CmpA"));
    assert!(position("/* in ctor */") < position("constructor(hostRef)"));
    assert!(position("// before render") < position("render()"));
}

#[test]
fn keeps_comments_of_commonjs_classes() {
    let source = "// header
import { Component } from '@stencil/core';
/** Docs for CmpA. */
@Component({ tag: 'cmp-a' })
export class CmpA {}
";
    let options = TransformOptions::default().with_module(ModuleConvention::Cjs);
    let code = transform(source, &options).code;

    assert!(code.find("// header").unwrap() < code.find("require").unwrap());
    let docs = code.find("/** Docs for CmpA. */").expect("class docs");
    assert!(docs < code.find("class CmpA").unwrap());
}

#[test]
fn warns_when_constructor_parameters_are_dropped() {
    let source = r#"
        @Component({ tag: 'cmp-a' })
        export class CmpA extends Base {
            constructor(a) {
                super(a);
                this.y = a;
            }
        }
    "#;
    let logger = CapturingLogger::new(LogLevel::Warn);
    let output = transform_module(source, "cmp-a.ts", &TransformOptions::default(), &logger).unwrap();

    assert!(squash(&output.code).contains("constructor(hostRef){__stencil_registerInstance(this,hostRef);super(a);this.y=a;}"));
    assert_eq!(output.report.diagnostics.len(), 1);
    assert_eq!(output.report.diagnostics[0].code, ErrorCode::ConstructorParametersDropped);
    assert!(!output.report.has_errors());
    assert_eq!(logger.messages_at(LogLevel::Warn).len(), 1);
}
