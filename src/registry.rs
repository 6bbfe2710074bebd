//! Document-side bookkeeping for mounted sx stylesheets.
//!
//! A host keeps one [`StyleRegistry`] per document and drives it from its own
//! component lifecycle: [`mount`](StyleRegistry::mount) when a component
//! first renders, [`rerender`](StyleRegistry::rerender) on every later
//! render, [`unmount`](StyleRegistry::unmount) when it goes away. The
//! registry holds each component's current stylesheet block so the host can
//! emit them together with [`document_css`](StyleRegistry::document_css).

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::css::compiler::{CompiledStyle, StyleCompiler};
use crate::css::config::{CompilerConfig, ConfigError, ScopePolicy};
use crate::css::directive::StyleDirective;
use crate::css::scope::{RandomScope, ScopeClass, ScopeSource};

new_key_type! {
    /// Handle to a mounted component's stylesheet. Copy, lightweight (u64).
    pub struct StyleHandle;
}

#[derive(Debug, Clone, Default)]
struct MountedStyle {
    /// Scope the component carries now; `None` while it renders without a directive.
    scope: Option<ScopeClass>,
    /// First scope issued to the instance, reused under `ScopePolicy::PerInstance`.
    instance_scope: Option<ScopeClass>,
    stylesheet_text: String,
}

/// Mounted stylesheet blocks, keyed by component instance.
#[derive(Debug)]
pub struct StyleRegistry<S = RandomScope> {
    compiler: StyleCompiler<S>,
    mounted: SlotMap<StyleHandle, MountedStyle>,
    /// Handles in mount order, for stable document output.
    order: Vec<StyleHandle>,
}

impl StyleRegistry<RandomScope> {
    /// A registry with the default config and random scopes.
    pub fn new() -> Self {
        Self::with_compiler(StyleCompiler::new())
    }

    /// A registry with a custom config and random scopes.
    pub fn with_config(config: CompilerConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_compiler(StyleCompiler::with_config(config)?))
    }
}

impl Default for StyleRegistry<RandomScope> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ScopeSource> StyleRegistry<S> {
    pub fn with_compiler(compiler: StyleCompiler<S>) -> Self {
        Self {
            compiler,
            mounted: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    pub fn compiler(&self) -> &StyleCompiler<S> {
        &self.compiler
    }

    /// Compile a new component's first render and record its stylesheet.
    pub fn mount(&mut self, directive: Option<&StyleDirective>) -> (StyleHandle, CompiledStyle) {
        let mut entry = MountedStyle::default();
        let compiled = compile_entry(&mut self.compiler, &mut entry, directive);
        let handle = self.mounted.insert(entry);
        self.order.push(handle);
        debug!(?handle, scope = %compiled.scope_class_name, "mounted sx stylesheet");
        (handle, compiled)
    }

    /// Recompile a mounted component and replace its stylesheet.
    ///
    /// Under [`ScopePolicy::PerRender`] a new scope class is generated on every
    /// call; under [`ScopePolicy::PerInstance`] the component's first scope is
    /// reused. A `None` directive clears the stylesheet and the current scope;
    /// a `PerInstance` component gets its first scope back on the next
    /// directive. Returns `None` for a handle that is not mounted.
    pub fn rerender(
        &mut self,
        handle: StyleHandle,
        directive: Option<&StyleDirective>,
    ) -> Option<CompiledStyle> {
        let entry = self.mounted.get_mut(handle)?;
        Some(compile_entry(&mut self.compiler, entry, directive))
    }

    /// Drop a component's stylesheet. Returns `false` if it was not mounted.
    pub fn unmount(&mut self, handle: StyleHandle) -> bool {
        if self.mounted.remove(handle).is_none() {
            return false;
        }
        self.order.retain(|&h| h != handle);
        debug!(?handle, "unmounted sx stylesheet");
        true
    }

    /// The current stylesheet text of a mounted component.
    pub fn get(&self, handle: StyleHandle) -> Option<&str> {
        self.mounted
            .get(handle)
            .map(|entry| entry.stylesheet_text.as_str())
    }

    /// The scope class a mounted component currently carries.
    pub fn scope_of(&self, handle: StyleHandle) -> Option<&ScopeClass> {
        self.mounted.get(handle).and_then(|entry| entry.scope.as_ref())
    }

    pub fn contains(&self, handle: StyleHandle) -> bool {
        self.mounted.contains_key(handle)
    }

    /// Number of mounted components.
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// All non-empty stylesheet blocks in mount order, one block per line group.
    pub fn document_css(&self) -> String {
        self.order
            .iter()
            .filter_map(|&h| self.mounted.get(h))
            .map(|entry| entry.stylesheet_text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn compile_entry<S: ScopeSource>(
    compiler: &mut StyleCompiler<S>,
    entry: &mut MountedStyle,
    directive: Option<&StyleDirective>,
) -> CompiledStyle {
    let Some(directive) = directive else {
        entry.scope = None;
        entry.stylesheet_text.clear();
        return CompiledStyle::default();
    };

    let scope = match compiler.config().scope_policy {
        ScopePolicy::PerRender => compiler.next_scope(),
        ScopePolicy::PerInstance => entry
            .instance_scope
            .get_or_insert_with(|| compiler.next_scope())
            .clone(),
    };
    let compiled = compiler.compile_scoped(directive, &scope);
    entry.scope = Some(scope);
    entry.stylesheet_text.clone_from(&compiled.stylesheet_text);
    compiled
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::css::directive::StyleDeclarations;
    use crate::css::scope::SequentialScope;

    fn registry(policy: ScopePolicy) -> StyleRegistry<SequentialScope> {
        let config = CompilerConfig::new()
            .without_transition()
            .with_scope_policy(policy);
        let compiler = StyleCompiler::with_source(config, SequentialScope::with_nonce("r")).unwrap();
        StyleRegistry::with_compiler(compiler)
    }

    fn hover(color: &str) -> StyleDirective {
        StyleDirective::new().set("&:hover", StyleDeclarations::new().set("color", color))
    }

    #[test]
    fn test_mount_records_stylesheet() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, compiled) = reg.mount(Some(&hover("red")));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(handle), Some(compiled.stylesheet_text.as_str()));
        assert_eq!(reg.scope_of(handle).map(ScopeClass::as_str), Some("sx-r0000000"));
    }

    #[test]
    fn test_mount_without_directive() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, compiled) = reg.mount(None);
        assert_eq!(compiled, CompiledStyle::default());
        assert!(reg.contains(handle));
        assert_eq!(reg.get(handle), Some(""));
        assert_eq!(reg.scope_of(handle), None);
    }

    #[test]
    fn test_rerender_per_render_changes_scope() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, first) = reg.mount(Some(&hover("red")));
        let second = reg.rerender(handle, Some(&hover("red"))).unwrap();
        assert_ne!(first.scope_class_name, second.scope_class_name);
        assert_eq!(reg.get(handle), Some(".sx-r0000001:hover { color: red; }"));
    }

    #[test]
    fn test_rerender_per_instance_keeps_scope() {
        let mut reg = registry(ScopePolicy::PerInstance);
        let (handle, first) = reg.mount(Some(&hover("red")));
        let second = reg.rerender(handle, Some(&hover("blue"))).unwrap();
        assert_eq!(first.scope_class_name, second.scope_class_name);
        assert_eq!(reg.get(handle), Some(".sx-r0000000:hover { color: blue; }"));
    }

    #[test]
    fn test_per_instance_scope_assigned_on_first_directive() {
        let mut reg = registry(ScopePolicy::PerInstance);
        let (handle, _) = reg.mount(None);
        let a = reg.rerender(handle, Some(&hover("red"))).unwrap();
        let b = reg.rerender(handle, Some(&hover("red"))).unwrap();
        assert_eq!(a.scope_class_name, "sx-r0000000");
        assert_eq!(b.scope_class_name, "sx-r0000000");
    }

    #[test]
    fn test_per_instance_scopes_differ_between_instances() {
        let mut reg = registry(ScopePolicy::PerInstance);
        let (_, a) = reg.mount(Some(&hover("red")));
        let (_, b) = reg.mount(Some(&hover("red")));
        assert_ne!(a.scope_class_name, b.scope_class_name);
    }

    #[test]
    fn test_rerender_with_none_clears_stylesheet() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, _) = reg.mount(Some(&hover("red")));
        let compiled = reg.rerender(handle, None).unwrap();
        assert_eq!(compiled, CompiledStyle::default());
        assert_eq!(reg.get(handle), Some(""));
    }

    #[test]
    fn test_rerender_with_none_drops_current_scope() {
        for policy in [ScopePolicy::PerRender, ScopePolicy::PerInstance] {
            let mut reg = registry(policy);
            let (handle, _) = reg.mount(Some(&hover("red")));
            reg.rerender(handle, None).unwrap();
            assert_eq!(reg.scope_of(handle), None, "{policy:?}");
        }
    }

    #[test]
    fn test_per_instance_scope_survives_render_without_directive() {
        let mut reg = registry(ScopePolicy::PerInstance);
        let (handle, first) = reg.mount(Some(&hover("red")));
        reg.rerender(handle, None).unwrap();
        let again = reg.rerender(handle, Some(&hover("blue"))).unwrap();
        assert_eq!(again.scope_class_name, first.scope_class_name);
        assert_eq!(reg.scope_of(handle).map(ScopeClass::as_str), Some("sx-r0000000"));
    }

    #[test]
    fn test_per_render_scope_after_render_without_directive() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, _) = reg.mount(Some(&hover("red")));
        reg.rerender(handle, None).unwrap();
        let again = reg.rerender(handle, Some(&hover("red"))).unwrap();
        assert_eq!(again.scope_class_name, "sx-r0000001");
        assert_eq!(reg.scope_of(handle).map(ScopeClass::as_str), Some("sx-r0000001"));
    }

    #[test]
    fn test_unmount() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (handle, _) = reg.mount(Some(&hover("red")));
        assert!(reg.unmount(handle));
        assert!(!reg.unmount(handle));
        assert!(reg.is_empty());
        assert_eq!(reg.get(handle), None);
        assert_eq!(reg.rerender(handle, Some(&hover("red"))), None);
    }

    #[test]
    fn test_document_css_in_mount_order() {
        let mut reg = registry(ScopePolicy::PerRender);
        let (a, _) = reg.mount(Some(&hover("red")));
        let (_, _) = reg.mount(Some(&StyleDirective::new().set("color", "gray")));
        let (c, _) = reg.mount(Some(&hover("blue")));

        assert_eq!(
            reg.document_css(),
            ".sx-r0000000:hover { color: red; }\n.sx-r0000002:hover { color: blue; }"
        );

        reg.unmount(a);
        let (_, _) = reg.mount(Some(&hover("green")));
        assert_eq!(
            reg.document_css(),
            ".sx-r0000002:hover { color: blue; }\n.sx-r0000003:hover { color: green; }"
        );

        reg.unmount(c);
        assert_eq!(reg.document_css(), ".sx-r0000003:hover { color: green; }");
    }

    #[test]
    fn test_with_config_validates() {
        assert!(StyleRegistry::with_config(CompilerConfig::new().with_suffix_len(2)).is_err());
        assert!(StyleRegistry::with_config(CompilerConfig::new()).is_ok());
    }
}
