//! Conversions between wire types and domain types.

use pena_core::domain::{NewPost, Page, Post, PostPatch, PostStats};
use pena_shared::dto::{
    CreatePostRequest, PostPageResponse, PostResponse, StatsResponse, UpdatePostRequest,
};

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        slug: post.slug,
        title: post.title,
        excerpt: post.excerpt,
        content: post.content,
        published: post.published,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
        category: post.category,
        tags: post.tags,
        reading_time: post.reading_time,
        meta_title: post.meta_title,
        meta_description: post.meta_description,
        featured_image: post.featured_image,
    }
}

pub fn posts_response(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

pub fn page_response(page: Page<Post>) -> PostPageResponse {
    PostPageResponse {
        posts: posts_response(page.items),
        next_cursor: page.next_cursor,
    }
}

pub fn stats_response(stats: PostStats) -> StatsResponse {
    StatsResponse {
        total: stats.total,
        published: stats.published,
        drafts: stats.drafts,
    }
}

pub fn new_post(req: CreatePostRequest) -> NewPost {
    NewPost {
        title: req.title,
        slug: req.slug,
        content: req.content,
        excerpt: req.excerpt,
        published: req.published,
        category: req.category,
        tags: req.tags,
        featured_image: req.featured_image,
        meta_title: req.meta_title,
        meta_description: req.meta_description,
    }
}

pub fn post_patch(req: UpdatePostRequest) -> PostPatch {
    PostPatch {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        published: req.published,
        category: req.category,
        tags: req.tags,
        featured_image: req.featured_image,
        meta_title: req.meta_title,
        meta_description: req.meta_description,
    }
}
