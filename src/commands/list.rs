//! List site content

use anyhow::Result;

use super::print_json;
use crate::helpers::date::display_date;
use crate::Garden;

/// List site content by type
pub fn run(garden: &Garden, content_type: &str, json: bool) -> Result<()> {
    let repo = garden.repository();
    let date_format = &garden.config.date_format;

    match content_type {
        "post" | "posts" => {
            let posts = repo.all_posts()?;
            if json {
                return print_json(posts);
            }
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]{}",
                    display_date(&post.date, date_format),
                    post.title,
                    post.slug,
                    if post.featured { " *" } else { "" }
                );
            }
        }
        "project" | "projects" => {
            let projects = repo.all_projects()?;
            if json {
                return print_json(projects);
            }
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {} - {} ({}) [{}]{}",
                    display_date(&project.date, date_format),
                    project.title,
                    project.status,
                    project.slug,
                    if project.featured { " *" } else { "" }
                );
            }
        }
        "tag" | "tags" => {
            let tags = repo.all_tags()?;
            if json {
                return print_json(&tags);
            }
            println!("Tags ({}):", tags.len());
            for t in tags {
                println!("  {} ({})", t.tag, t.count);
            }
        }
        "category" | "categories" => {
            let categories = repo.all_categories()?;
            if json {
                return print_json(&categories);
            }
            println!("Categories ({}):", categories.len());
            for c in categories {
                println!("  {} ({})", c.category, c.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Show the featured post, the featured projects and any slug collisions
pub fn featured(garden: &Garden, json: bool) -> Result<()> {
    let repo = garden.repository();
    let post = repo.featured_post()?;
    let projects = repo.featured_projects()?;

    if json {
        return print_json(&serde_json::json!({
            "post": post,
            "projects": projects,
        }));
    }

    match post {
        Some(post) => println!("Featured post: {} [{}]", post.title, post.slug),
        None => println!("Featured post: none"),
    }
    println!("Featured projects ({}):", projects.len());
    for project in projects {
        println!("  {} - {}", project.title, project.link);
    }

    for (slug, sources) in repo.duplicate_post_slugs()? {
        println!("Warning: post slug {:?} is shared by {:?}", slug, sources);
    }
    for (slug, sources) in repo.duplicate_project_slugs()? {
        println!("Warning: project slug {:?} is shared by {:?}", slug, sources);
    }

    Ok(())
}
