use std::marker::PhantomData;

use super::edit_context::{EditContext, FieldIdentifier};
use super::FormError;

/// Maps a field's edit state to the class string put on its input.
pub trait FieldCssClassProvider: Send + Sync {
    fn field_css_class(&self, ctx: &EditContext, field: &FieldIdentifier) -> String;
}

/// Plain `valid`/`invalid` classes, prefixed with `modified` once touched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFieldCssClassProvider;

impl FieldCssClassProvider for DefaultFieldCssClassProvider {
    fn field_css_class(&self, ctx: &EditContext, field: &FieldIdentifier) -> String {
        let is_valid = ctx.is_valid(field);
        match (ctx.is_modified(field), is_valid) {
            (true, true) => "modified valid",
            (true, false) => "modified invalid",
            (false, true) => "valid",
            (false, false) => "invalid",
        }
        .to_string()
    }
}

/// Bootstrap `form-control` styling. Untouched fields stay neutral even when
/// they carry validation messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootstrapFieldCssClassProvider;

impl BootstrapFieldCssClassProvider {
    pub const NEUTRAL: &'static str = "form-control";
    pub const VALID: &'static str = "form-control modified is-valid";
    pub const INVALID: &'static str = "form-control modified is-invalid";
}

impl FieldCssClassProvider for BootstrapFieldCssClassProvider {
    fn field_css_class(&self, ctx: &EditContext, field: &FieldIdentifier) -> String {
        let is_valid = ctx.is_valid(field);
        let is_modified = ctx.is_modified(field);
        match (is_modified, is_valid) {
            (true, true) => Self::VALID,
            (true, false) => Self::INVALID,
            (false, true) => Self::NEUTRAL,
            (false, false) => Self::NEUTRAL,
        }
        .to_string()
    }
}

/// Installs a `P` on the surrounding form's [`EditContext`].
pub struct CustomCssClassProvider<P> {
    _provider: PhantomData<P>,
}

impl<P> CustomCssClassProvider<P>
where
    P: FieldCssClassProvider + Default + 'static,
{
    pub fn attach(ctx: Option<&mut EditContext>) -> Result<(), FormError> {
        let ctx = ctx.ok_or(FormError::MissingEditContext {
            component: std::any::type_name::<Self>(),
        })?;
        ctx.set_field_css_class_provider(Box::new(P::default()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(modified: bool, valid: bool) -> (EditContext, FieldIdentifier) {
        let mut ctx = EditContext::new("Tag");
        let field = ctx.field("Name");
        if modified {
            ctx.notify_field_changed(&field);
        }
        if !valid {
            ctx.add_validation_message(&field, "tag name required");
        }
        (ctx, field)
    }

    #[test]
    fn bootstrap_mapping_is_total() {
        let cases = [
            (true, true, "form-control modified is-valid"),
            (true, false, "form-control modified is-invalid"),
            (false, true, "form-control"),
            (false, false, "form-control"),
        ];
        for (modified, valid, expected) in cases {
            let (ctx, field) = context(modified, valid);
            let class = BootstrapFieldCssClassProvider.field_css_class(&ctx, &field);
            assert_eq!(class, expected, "modified={modified} valid={valid}");
        }
    }

    #[test]
    fn default_provider_used_until_replaced() {
        let (mut ctx, field) = context(true, false);
        assert_eq!(ctx.field_css_class(&field), "modified invalid");

        CustomCssClassProvider::<BootstrapFieldCssClassProvider>::attach(Some(&mut ctx)).unwrap();
        assert_eq!(ctx.field_css_class(&field), BootstrapFieldCssClassProvider::INVALID);
    }

    #[test]
    fn attach_without_context_fails() {
        let err = CustomCssClassProvider::<BootstrapFieldCssClassProvider>::attach(None).unwrap_err();
        assert!(matches!(err, FormError::MissingEditContext { .. }));
        assert!(err.to_string().contains("requires an EditContext"));
    }
}
