use crate::models::email::{BatchOptions, CleanListResponse, ValidationOptions, Verdict};
use crate::worker::{ValidationWorker, parse_addresses};
use async_graphql::{Context, Error, ErrorExtensions, Object, Result};

/// Email validation query operations
///
/// Both resolvers read the [`ValidationWorker`] from the schema data.
#[derive(Default)]
pub struct EmailQuery;

#[Object]
impl EmailQuery {
    /// Verdict for a single address. Rejections are part of the verdict, not errors.
    async fn validate_email(
        &self,
        ctx: &Context<'_>,
        email: String,
        options: Option<ValidationOptions>,
    ) -> Result<Verdict> {
        let worker = ctx.data::<ValidationWorker>()?;
        let options = options.unwrap_or_default();
        Ok(worker.validate_email(&email, &options).await)
    }

    /// Cleans a newline-separated list.
    ///
    /// # Errors
    /// `EMPTY_INPUT` when the text holds no addresses.
    async fn clean_list(
        &self,
        ctx: &Context<'_>,
        text: String,
        options: Option<ValidationOptions>,
        #[graphql(default)] allow_duplicates: bool,
    ) -> Result<CleanListResponse> {
        if parse_addresses(&text).is_empty() {
            return Err(Error::new("No email addresses found in the input")
                .extend_with(|_, e| e.set("code", "EMPTY_INPUT")));
        }

        let worker = ctx.data::<ValidationWorker>()?;
        let options = BatchOptions {
            validation: options.unwrap_or_default(),
            allow_duplicates,
        };
        Ok(worker.clean_list(&text, &options).await)
    }
}
