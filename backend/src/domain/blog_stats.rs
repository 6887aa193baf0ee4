//! Like aggregates over a blog collection.

use crate::domain::Blog;

/// Sum of likes across `blogs`.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().map(|blog| blog.likes().get()).sum()
}

/// The most liked blog; on ties the earliest one wins.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best: Option<&Blog>, blog| match best {
        Some(current) if current.likes() >= blog.likes() => Some(current),
        _ => Some(blog),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlogDraft, BlogId, UserId};
    use rstest::rstest;

    fn blog(title: &str, likes: i64) -> Blog {
        let draft = BlogDraft::try_new(Some(title), None, Some("http://example.com"), Some(likes))
            .expect("valid draft");
        Blog::new(BlogId::random(), UserId::random(), draft)
    }

    #[rstest]
    fn empty_list_has_no_likes_or_favourite() {
        assert_eq!(total_likes(&[]), 0);
        assert!(favorite_blog(&[]).is_none());
    }

    #[rstest]
    fn sums_likes() {
        let blogs = [blog("a", 7), blog("b", 5), blog("c", 12), blog("d", 0)];
        assert_eq!(total_likes(&blogs), 24);
    }

    #[rstest]
    fn favourite_is_most_liked_and_first_on_ties() {
        let blogs = [blog("a", 10), blog("b", 12), blog("c", 12), blog("d", 2)];
        let favourite = favorite_blog(&blogs).expect("non-empty");
        assert_eq!(favourite.title(), "b");
    }
}
