//! Content of the built-in sections that lives only for the session.
//!
//! Only the overview text, the main objective, the section order and the
//! custom section texts are saved with the document. Everything here starts
//! from compiled-in data on each launch.

mod notes;
mod tables;
mod tasks;

pub use notes::{Note, NoteBook};
pub use tables::{
    cell_key, default_action_plan, default_metrics, default_monitoring, MultilineColumns,
    TableConfig, TableRow, TableSet,
};
pub use tasks::{
    format_deadline, Filter, Task, TaskBoard, TaskDraft, TaskPriority, TaskStatus,
};

/// A labelled one-line value shown on the overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// A titled list of specific objectives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveGroup {
    pub icon: &'static str,
    pub title: &'static str,
    pub items: Vec<String>,
}

/// Columns of the planned activities tables.
pub const ACTIVITY_HEADERS: [&str; 5] = [
    "Atividade",
    "Descrição",
    "Resultado Esperado",
    "Prazo",
    "Observação",
];

/// Read-only summary shown under the overview: activity, description, expected result.
pub const OVERVIEW_SUMMARY: [(&str, &str, &str); 7] = [
    (
        "Meta Business",
        "Focar em análise de desempenho, métricas, resultados, dados; Agendamento de stories (ou alinhar com a Flap).",
        "Otimizar tempo e estratégias, facilitar o planejamento de ações futuras e ter controle sobre o que não está funcionando bem para ajustes e conhecimento sobre o que está funcionando, visando novas metas.",
    ),
    (
        "Canva",
        "Estudar e utilizar com mais frequência, gerar e trazer demandas (ex. Roteiros e Stickers).",
        "Melhorar habilidades no Canva e trazer mais demandas criativas.",
    ),
    (
        "CapCut",
        "Estudar as funções do PRO, melhorar técnicas de edição.",
        "Vídeos com mais qualidade e criativos, aumentar as demandas de vídeos, explorar novas técnicas.",
    ),
    (
        "Instagram",
        "Planejamento mensal de criativos para stories, além de utilizar o Meta Business.",
        "Informar e engajar nos stories; reter a atenção e interação de clientes e prospects, saber a relevância de cada conteúdo e onde podemos melhorar.",
    ),
    (
        "YouTube",
        "Postar em Shorts o mesmo conteúdo que é postado em reels do Instagram (foco principal em vídeos informativos).",
        "Alimentar essa seção do YouTube para entregar vídeos curtos para nosso público, além de usar esse meio como atração de prospects.",
    ),
    (
        "Conhecimento",
        "Cursos, livros, prática, mentorias, networking, pesquisa e autoaprendizado (criar material próprio de aprendizados para consultas).",
        "Melhorar habilidades no Canva, CapCut, Meta Business, Instagram; stories em tempo real e planejamento de criativos para stories.",
    ),
    (
        "Pesquisas",
        "Equipamentos para vídeo (foco principal em luz e estabilizador) e construtoras (foco nas mais conhecidas).",
        "Aprimorar conteúdos em vídeo, analisar o que outras construtoras estão fazendo de diferente e filtrar o que faz sentido implementar nas nossas redes.",
    ),
];

fn default_highlights() -> Vec<Highlight> {
    vec![
        Highlight {
            icon: "📅",
            label: "Período",
            value: "6 meses".to_string(),
        },
        Highlight {
            icon: "🎯",
            label: "Meta Principal",
            value: "800k visualizações".to_string(),
        },
        Highlight {
            icon: "⊕",
            label: "Foco",
            value: "Produção de Conteúdo Digital".to_string(),
        },
    ]
}

fn default_objective_groups() -> Vec<ObjectiveGroup> {
    let items = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
    vec![
        ObjectiveGroup {
            icon: "📖",
            title: "Desenvolvimento Técnico",
            items: items(&[
                "Domínio avançado do CANVA PRO para criação de designs profissionais, incluindo templates personalizados, identidade visual consistente e materiais de alta qualidade para todas as plataformas digitais",
                "Especialização em edição com CAPCUT para produção de vídeos virais, incluindo efeitos especiais, transições profissionais e edição de áudio para maximizar o engajamento",
                "Proficiência avançada em análise de métricas com NINJALITICS, desenvolvendo capacidade de interpretação de dados para otimização contínua de conteúdo e estratégias",
                "Aperfeiçoamento em copywriting estratégico para redes sociais, com foco em storytelling, gatilhos mentais e técnicas de persuasão para maximizar conversões",
            ]),
        },
        ObjectiveGroup {
            icon: "👥",
            title: "Presença Digital",
            items: items(&[
                "Estabelecer uma identidade visual única e profissional, com padrões consistentes de design, cores e elementos visuais que reflitam autoridade e credibilidade no nicho",
                "Desenvolver e implementar estratégia de conteúdo viral focada em tendências, storytelling e temas relevantes para o público-alvo, visando crescimento orgânico acelerado",
                "Construir uma comunidade engajada através de interação constante, conteúdo de valor e estratégias de relacionamento que promovam conexão autêntica com o público",
                "Atingir a marca de 100 mil seguidores ativos em 6 meses através de estratégias orgânicas, colaborações estratégicas e conteúdo viral de alta qualidade",
            ]),
        },
    ]
}

/// Session-only content of every built-in section plus the notes.
#[derive(Debug, Clone)]
pub struct SectionContent {
    pub highlights: Vec<Highlight>,
    pub objective_groups: Vec<ObjectiveGroup>,
    pub action_plan: TableSet,
    pub metrics: TableSet,
    pub monitoring: TableSet,
    pub tasks: TaskBoard,
    pub notes: NoteBook,
}

impl Default for SectionContent {
    fn default() -> Self {
        Self {
            highlights: default_highlights(),
            objective_groups: default_objective_groups(),
            action_plan: default_action_plan(),
            metrics: default_metrics(),
            monitoring: default_monitoring(),
            tasks: TaskBoard::default(),
            notes: NoteBook::default(),
        }
    }
}
