//! Terminal painting of a [`Page`](crate::page::Page) using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, PageRenderer};

/// Layout of the whole page as plain text.
///
/// History shortcuts are numbered from 1 so they can be picked by number.
pub const PAGE_TEMPLATE: &str = r#"== GitHub profile lookup ==  [theme: {{toggle.label}}]
{{#if loading}}
Loading...
{{/if}}
{{#if status}}
! {{status}}
{{/if}}
{{#if profile}}

{{profile.name}} ({{profile.username}})
{{profile.bio}}
Followers: {{profile.followers}}  Following: {{profile.following}}  Repos: {{profile.public_repos}}
Location: {{profile.location}}
Blog: {{profile.blog.text}}
Joined: {{profile.created}}
Profile: {{profile.profile_link}}
Avatar: {{profile.avatar.src}} [{{profile.avatar.alt}}]

Latest repositories (total stars: {{repositories.total_stars}})
{{#if repositories.placeholder}}
  {{repositories.placeholder}}
{{/if}}
{{#each repositories.cards}}
  {{name}} <{{url}}>
    {{description}}
    Stars: {{stars}}  Forks: {{forks}}  Lang: {{language}}
{{/each}}
{{/if}}
{{#if history}}

History:{{#each history}} [{{inc @index}}] {{identifier}}{{/each}}
{{/if}}
"#;
