//! Sample content for fresh installs and local development.

use std::sync::Arc;

use pena_core::domain::NewPost;
use pena_core::ports::PostRepository;
use pena_core::{DomainError, PostService};

struct SamplePost {
    title: &'static str,
    slug: &'static str,
    excerpt: &'static str,
    content: &'static str,
    published: bool,
    category: &'static str,
    tags: &'static [&'static str],
    meta_title: &'static str,
    meta_description: &'static str,
    featured_image: Option<&'static str>,
}

impl SamplePost {
    fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.to_string(),
            slug: Some(self.slug.to_string()),
            content: self.content.to_string(),
            excerpt: Some(self.excerpt.to_string()),
            published: self.published,
            category: Some(self.category.to_string()),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            featured_image: self.featured_image.map(str::to_string),
            meta_title: Some(self.meta_title.to_string()),
            meta_description: Some(self.meta_description.to_string()),
        }
    }
}

const SAMPLE_POSTS: &[SamplePost] = &[
    SamplePost {
        title: "Introdução à Saúde Pública: Conceitos Fundamentais",
        slug: "introducao-saude-publica-conceitos-fundamentais",
        excerpt: "Explore os conceitos básicos e a importância da saúde pública para o bem-estar da população brasileira.",
        content: "# Introdução à Saúde Pública

A saúde pública é uma disciplina fundamental que visa proteger e melhorar a saúde de comunidades inteiras. No Brasil, enfrentamos desafios únicos que requerem abordagens específicas e inovadoras.

## O que é Saúde Pública?

A saúde pública é **a arte e a ciência de prevenir doenças, prolongar a vida e promover a saúde** através dos esforços organizados da sociedade.

### Pilares da Saúde Pública

1. **Prevenção de doenças**
2. **Promoção da saúde**
3. **Vigilância epidemiológica**
4. **Educação em saúde**

## Importância no Contexto Brasileiro

O Sistema Único de Saúde (SUS) representa um dos maiores sistemas públicos de saúde do mundo, garantindo acesso universal e gratuito aos serviços de saúde.

> \"A saúde é direito de todos e dever do Estado\" - Constituição Federal de 1988",
        published: true,
        category: "educacao",
        tags: &["saúde pública", "conceitos básicos", "SUS", "educação"],
        meta_title: "Introdução à Saúde Pública: Guia Completo dos Conceitos Fundamentais",
        meta_description: "Descubra os conceitos fundamentais da saúde pública e sua importância no contexto brasileiro.",
        featured_image: None,
    },
    SamplePost {
        title: "Epidemiologia: A Ciência por Trás da Prevenção",
        slug: "epidemiologia-ciencia-prevencao",
        excerpt: "Entenda como a epidemiologia nos ajuda a compreender e controlar doenças na população.",
        content: "# Epidemiologia: A Ciência por Trás da Prevenção

A epidemiologia é frequentemente chamada de \"a ciência básica da saúde pública\". Ela estuda a distribuição e os determinantes de eventos relacionados à saúde em populações específicas.

## Métodos Epidemiológicos

- Relatos de caso
- Estudos transversais
- Estudos de coorte
- Ensaios clínicos randomizados

## Exemplo: COVID-19

A pandemia de COVID-19 demonstrou a importância da epidemiologia na tomada de decisões em saúde pública.",
        published: true,
        category: "epidemiologia",
        tags: &["epidemiologia", "pesquisa", "métodos científicos", "prevenção"],
        meta_title: "Epidemiologia: Guia Completo da Ciência da Prevenção em Saúde",
        meta_description: "Aprenda sobre epidemiologia, seus métodos e aplicações na saúde pública.",
        featured_image: None,
    },
    SamplePost {
        title: "Tecnologia e Inovação na Saúde Pública",
        slug: "tecnologia-inovacao-saude-publica",
        excerpt: "Descubra como a tecnologia está revolucionando a forma como abordamos os desafios da saúde pública.",
        content: "# Tecnologia e Inovação na Saúde Pública

A revolução digital está transformando todos os aspectos da sociedade, e a saúde pública não é exceção.

## Telemedicina e Consultas Remotas

- Consultas médicas à distância
- Monitoramento remoto de pacientes
- Maior acesso em áreas rurais

## Casos de Sucesso no Brasil

- **ConecteSUS**: plataforma digital do Ministério da Saúde
- **TeleSUS**: atendimento médico remoto
- **e-SUS**: sistema de informação da Atenção Básica",
        published: true,
        category: "featured",
        tags: &["tecnologia", "inovação", "telemedicina", "inteligência artificial", "big data"],
        meta_title: "Tecnologia na Saúde Pública: Inovações que Transformam o Cuidado",
        meta_description: "Explore como a tecnologia está revolucionando a saúde pública.",
        featured_image: Some(
            "https://images.unsplash.com/photo-1576091160399-112ba8d25d1f?w=800&h=400&fit=crop",
        ),
    },
    SamplePost {
        title: "Políticas Públicas de Saúde no Brasil: Conquistas e Desafios",
        slug: "politicas-publicas-saude-brasil-conquistas-desafios",
        excerpt: "Uma análise das principais políticas de saúde brasileiras, suas conquistas históricas e os desafios contemporâneos.",
        content: "# Políticas Públicas de Saúde no Brasil: Conquistas e Desafios

Desde a criação do SUS, em 1988, o país tem buscado garantir o acesso universal à saúde como direito fundamental.

## Princípios Doutrinários

- **Universalidade**: saúde para todos
- **Integralidade**: cuidado completo
- **Equidade**: tratamento igual para necessidades diferentes

## Desafios Contemporâneos

- Subfinanciamento crônico
- Desigualdades regionais
- Envelhecimento populacional",
        published: false,
        category: "politicas",
        tags: &["SUS", "políticas públicas", "Brasil", "direito à saúde", "sistema de saúde"],
        meta_title: "Políticas de Saúde no Brasil: SUS, Conquistas e Desafios Atuais",
        meta_description: "Análise das políticas públicas de saúde no Brasil, do SUS aos desafios atuais.",
        featured_image: None,
    },
];

/// What a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Insert the sample posts through the lifecycle service. Posts whose slug
/// already exists are left alone, so the run can be repeated.
pub async fn seed_sample_posts(repo: Arc<dyn PostRepository>) -> Result<SeedSummary, DomainError> {
    let posts = PostService::new(Arc::clone(&repo));
    let mut summary = SeedSummary::default();

    for sample in SAMPLE_POSTS {
        if repo.find_by_slug(sample.slug).await?.is_some() {
            tracing::debug!(slug = sample.slug, "Sample post already present");
            summary.skipped += 1;
            continue;
        }

        let post = posts.create(sample.to_new_post()).await?;
        tracing::info!(post_id = post.id, slug = %post.slug, "Seeded post");
        summary.created += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryPostRepository;

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());

        let first = seed_sample_posts(Arc::clone(&repo)).await.unwrap();
        assert_eq!(first.created, SAMPLE_POSTS.len());
        assert_eq!(first.skipped, 0);

        let second = seed_sample_posts(Arc::clone(&repo)).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, SAMPLE_POSTS.len());
    }

    #[tokio::test]
    async fn test_seed_keeps_slugs_and_drafts() {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        seed_sample_posts(Arc::clone(&repo)).await.unwrap();

        let posts = PostService::new(repo);
        let stats = posts.stats().await.unwrap();
        assert_eq!(stats.published, 3);
        assert_eq!(stats.drafts, 1);

        let tech = posts
            .get_by_slug("tecnologia-inovacao-saude-publica")
            .await
            .unwrap()
            .unwrap();
        assert!(tech.is_editors_pick());
        assert!(tech.published_at.is_some());

        assert!(
            posts
                .get_by_slug("politicas-publicas-saude-brasil-conquistas-desafios")
                .await
                .unwrap()
                .is_none()
        );
    }
}
