//! Show a single post or project

use anyhow::Result;

use super::print_json;
use crate::helpers::date::display_date;
use crate::Garden;

/// Print the record with this slug, or report that none exists
pub fn run(garden: &Garden, slug: &str, project: bool, json: bool) -> Result<()> {
    let repo = garden.repository();
    let date_format = &garden.config.date_format;

    if project {
        let Some(project) = repo.project_by_slug(slug)? else {
            anyhow::bail!("No project with slug {:?}", slug);
        };
        if json {
            return print_json(project);
        }
        println!("{}", project.title);
        println!("  date:   {}", display_date(&project.date, date_format));
        println!("  status: {}", project.status);
        println!("  link:   {}", project.link);
        println!("  tags:   {}", project.tags.join(", "));
        println!("  source: {}", project.source);
        println!();
        println!("{}", project.content);
    } else {
        let Some(post) = repo.post_by_slug(slug)? else {
            anyhow::bail!("No post with slug {:?}", slug);
        };
        if json {
            return print_json(post);
        }
        println!("{}", post.title);
        println!("  date:     {}", display_date(&post.date, date_format));
        println!("  category: {}", post.category);
        println!("  tags:     {}", post.tags.join(", "));
        println!("  source:   {}", post.source);
        println!();
        println!("{}", post.content);
    }

    Ok(())
}
