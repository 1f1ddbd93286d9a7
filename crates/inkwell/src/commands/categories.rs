//! Category command handlers.

use tabled::Tabled;

use inkwell_core::{Category, CategoryPatch, CategoryWithCount, NewCategory, PostQuery, Store};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{posts, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Posts")]
    posts: usize,
}

impl From<&CategoryWithCount> for CategoryRow {
    fn from(c: &CategoryWithCount) -> Self {
        Self {
            id: c.category.id,
            name: c.category.name.clone(),
            description: util::excerpt(&c.category.description, 40),
            posts: c.post_count,
        }
    }
}

fn detail(c: &Category) -> String {
    output::detail_lines(&[
        ("ID", c.id.to_string()),
        ("Name", c.name.clone()),
        ("Description", c.description.clone()),
        (
            "Posts",
            c.posts_count.map(|n| n.to_string()).unwrap_or_default(),
        ),
        ("Created", util::format_opt_time(c.created_at.as_ref())),
        ("Updated", util::format_opt_time(c.updated_at.as_ref())),
    ])
}

fn render_category(category: &Category, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, category, detail, |c| c.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &Store,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            // Counts come from the post cache, so load both.
            let query = PostQuery::default();
            tokio::join!(store.fetch_categories(), store.fetch_posts(&query));
            util::ensure_loaded(&store.categories(), "categories")?;
            util::ensure_loaded(&store.posts(), "posts")?;

            let rows = store.categories_with_counts();
            let out = output::render_list(
                &global.output,
                &rows,
                |c| CategoryRow::from(c),
                |c| c.category.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Get { id } => {
            let category = store
                .fetch_category(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("categories", id))?;
            render_category(&category, global)
        }

        CategoriesCommand::Create { name, description } => {
            let body = NewCategory::new(name).with_description(description.unwrap_or_default());
            let category = store.create_category(&body).await?;
            output::notice(
                &format!("Category {} created", category.id),
                global.quiet,
            );
            render_category(&category, global)
        }

        CategoriesCommand::Update {
            id,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                return Err(CliError::EmptyUpdate);
            }
            let patch = CategoryPatch { name, description };
            let category = store
                .patch_category(id, &patch)
                .await
                .map_err(|e| CliError::from(e).for_resource("categories", id))?;
            render_category(&category, global)
        }

        CategoriesCommand::Delete { id } => {
            if !util::confirm(
                "categories delete",
                &format!("Delete category {id}? Its posts are deleted with it."),
                global.yes,
            )? {
                return Ok(());
            }
            store
                .delete_category(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("categories", id))?;
            output::notice(&format!("Category {id} deleted"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Posts { id } => {
            let posts = store
                .fetch_category_posts(id)
                .await
                .map_err(|e| CliError::from(e).for_resource("categories", id))?;
            posts::render_posts(&posts, global)
        }
    }
}
