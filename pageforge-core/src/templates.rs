//! Source templates for generated pages.
//!
//! Each function renders one page-source variant as a string. Import
//! references and the serialized data payload are computed by the emitter;
//! templates only do layout. Literal braces in the output are doubled in the
//! format strings.

/// Page wrapping a content module: the wrapper receives the data payload and
/// the content renders as its child.
pub fn wrapped_page(content_import: &str, wrapper_import: &str, data: &str, route: &str) -> String {
    format!(
        "import React from 'react';
import {{ Route }} from 'react-router-dom';
import Component from '{content_import}';
import Wrapper from '{wrapper_import}';

const view = () => (
  <Wrapper data={{{data}}}>
    <Component />
  </Wrapper>
);

export default () => <Route path='{route}' component={{view}} />;
"
    )
}

/// Page with no content module; the wrapper renders from the data payload
/// alone.
pub fn standalone_page(wrapper_import: &str, data: &str, route: &str) -> String {
    format!(
        "import React from 'react';
import {{ Route }} from 'react-router-dom';
import Wrapper from '{wrapper_import}';

const view = () => <Wrapper data={{{data}}} />;

export default () => <Route path='{route}' component={{view}} />;
"
    )
}

/// Isolated example page: the example module itself is mounted as the
/// wrapper, with no route registration, so it can render full-screen.
pub fn isolated_page(content_import: &str, data: &str) -> String {
    format!(
        "import React from 'react';
import Wrapper from '{content_import}';

export default () => <Wrapper data={{{data}}} />;
"
    )
}

/// Example page: passes the example's raw source text and every export of
/// the example module to the wrapper, named exports labelled by name.
pub fn example_page(content_import: &str, wrapper_import: &str, data: &str, route: &str) -> String {
    format!(
        "import React from 'react';
import {{ Route }} from 'react-router-dom';
import fileContents from '!!raw-loader!{content_import}';
import Wrapper from '{wrapper_import}';
import * as Components from '{content_import}';

const view = () => (
  <Wrapper data={{{data}}} fileContents={{fileContents}}>
    {{[
      {{ name: 'default', component: <Components.default /> }},
      ...Object.keys(Components)
        .filter(componentName => componentName !== 'default')
        .map(componentName => {{
          const Component = Components[componentName];
          return {{ name: componentName, component: <Component /> }};
        }}),
    ]}}
  </Wrapper>
);

export default () => <Route path='{route}' component={{view}} />;
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_page_wires_imports_and_route() {
        let source = wrapped_page(
            "../../../packages/badge/README.md",
            "../../../wrappers/package-home",
            r#"{"id":"badge"}"#,
            "/packages/badge",
        );

        assert!(source.contains("import Component from '../../../packages/badge/README.md';"));
        assert!(source.contains("import Wrapper from '../../../wrappers/package-home';"));
        assert!(source.contains(r#"<Wrapper data={{"id":"badge"}}>"#));
        assert!(source.contains("<Route path='/packages/badge' component={view} />"));
    }

    #[test]
    fn test_standalone_page_has_no_content_import() {
        let source = standalone_page("../wrappers/item-list", r#"{"pageType":"docs"}"#, "/docs");

        assert!(!source.contains("import Component"));
        assert!(source.contains(r#"const view = () => <Wrapper data={{"pageType":"docs"}} />;"#));
        assert!(source.contains("<Route path='/docs'"));
    }

    #[test]
    fn test_isolated_page_mounts_content_without_route() {
        let source = isolated_page("../../basic", r#"{"id":"basic"}"#);

        assert!(source.contains("import Wrapper from '../../basic';"));
        assert!(!source.contains("Route"));
        assert!(!source.contains("react-router-dom"));
    }

    #[test]
    fn test_example_page_exposes_source_and_exports() {
        let source = example_page(
            "../../../packages/badge/examples/basic",
            "../../wrappers/package-example",
            "{}",
            "/packages/badge/examples/basic",
        );

        assert!(source
            .contains("import fileContents from '!!raw-loader!../../../packages/badge/examples/basic';"));
        assert!(source.contains("import * as Components from"));
        assert!(source.contains("name: 'default'"));
        assert!(source.contains("fileContents={fileContents}"));
    }
}
