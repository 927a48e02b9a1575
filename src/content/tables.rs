//! Collapsible editable tables used by the action plan, metrics and
//! monitoring sections.
//!
//! Cells are keyed by the lower-cased column header, so a row can be
//! rendered by walking the headers in order.

use log::debug;
use std::collections::BTreeMap;

/// Cell key for a column header.
pub fn cell_key(header: &str) -> String {
    header.to_lowercase()
}

/// Which columns are edited as multi-line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultilineColumns {
    All,
    Only(Vec<String>),
}

impl MultilineColumns {
    pub fn contains(&self, header: &str) -> bool {
        match self {
            MultilineColumns::All => true,
            MultilineColumns::Only(headers) => headers.iter().any(|h| h == header),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: BTreeMap<String, String>,
}

impl TableRow {
    /// Value under `header`, empty when the cell was never filled.
    pub fn cell(&self, header: &str) -> &str {
        self.cells
            .get(&cell_key(header))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub id: String,
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    pub multiline: MultilineColumns,
    pub expanded: bool,
}

impl TableConfig {
    /// Build a table from string literals. Each row lists its cells in header order.
    pub fn new(
        id: &str,
        title: &str,
        headers: &[&str],
        rows: &[&[&str]],
        multiline: MultilineColumns,
    ) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, values)| TableRow {
                id: (i + 1).to_string(),
                cells: headers
                    .iter()
                    .zip(values.iter())
                    .map(|(h, v)| (cell_key(h), v.to_string()))
                    .collect(),
            })
            .collect();

        Self {
            id: id.to_string(),
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
            multiline,
            expanded: true,
        }
    }

    fn row_mut(&mut self, row_id: &str) -> Option<&mut TableRow> {
        self.rows.iter_mut().find(|r| r.id == row_id)
    }

    /// A row id derived from `now_millis` that no existing row uses.
    fn unused_row_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        while self.rows.iter().any(|r| r.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

/// The tables of one section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSet {
    pub tables: Vec<TableConfig>,
}

impl TableSet {
    pub fn new(tables: Vec<TableConfig>) -> Self {
        Self { tables }
    }

    #[cfg(test)]
    pub fn table(&self, table_id: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    fn table_mut(&mut self, table_id: &str) -> Option<&mut TableConfig> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    /// Collapse or expand a table.
    pub fn toggle(&mut self, table_id: &str) {
        if let Some(table) = self.table_mut(table_id) {
            table.expanded = !table.expanded;
        }
    }

    /// Append an empty row and return its id.
    pub fn add_row(&mut self, table_id: &str, now_millis: i64) -> Option<String> {
        let table = self.table_mut(table_id)?;
        let id = table.unused_row_id(now_millis);
        let cells = table
            .headers
            .iter()
            .map(|h| (cell_key(h), String::new()))
            .collect();
        table.rows.push(TableRow {
            id: id.clone(),
            cells,
        });
        debug!("Added row {} to table {}", id, table_id);
        Some(id)
    }

    pub fn remove_row(&mut self, table_id: &str, row_id: &str) -> bool {
        let Some(table) = self.table_mut(table_id) else {
            return false;
        };
        let before = table.rows.len();
        table.rows.retain(|r| r.id != row_id);
        table.rows.len() != before
    }

    /// Set the cell under `header`. Returns `false` for unknown tables or rows.
    pub fn update_cell(&mut self, table_id: &str, row_id: &str, header: &str, value: String) -> bool {
        match self.table_mut(table_id).and_then(|t| t.row_mut(row_id)) {
            Some(row) => {
                row.cells.insert(cell_key(header), value);
                true
            }
            None => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Default Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Tables of the action plan section.
pub fn default_action_plan() -> TableSet {
    TableSet::new(vec![
        TableConfig::new(
            "technical",
            "2.1 Capacitação Técnica",
            &["Ferramenta", "Objetivo", "Prazo", "Investimento", "Status"],
            &[
                &["CANVA PRO", "Domínio avançado em design profissional, criação de templates personalizados e desenvolvimento de identidade visual consistente para todas as plataformas", "30 dias", "R$ 500,00", "Em andamento"],
                &["CAPCUT PRO", "Especialização em edição de vídeos virais, incluindo efeitos especiais avançados, transições profissionais e edição de áudio para maximizar engajamento", "45 dias", "R$ 750,00", "A iniciar"],
                &["Curso de Copywriting", "Desenvolvimento de habilidades em escrita persuasiva, storytelling e técnicas avançadas de copywriting para redes sociais", "60 dias", "R$ 1.200,00", "A iniciar"],
                &["NINJALITICS PRO", "Análise avançada de métricas, interpretação de dados e otimização estratégica de conteúdo baseada em performance", "30 dias", "R$ 450,00", "Em análise"],
            ],
            MultilineColumns::All,
        ),
        TableConfig::new(
            "content-strategy",
            "2.2 Estratégia de Conteúdo",
            &["Tipo", "Formato", "Frequência", "Objetivo", "Métrica Principal"],
            &[
                &["Conteúdo Educativo", "Carrossel + Reels", "3x por semana", "Estabelecer autoridade no nicho e gerar valor para a audiência", "50k visualizações/post"],
                &["Conteúdo Viral", "Reels + Stories", "4x por semana", "Aumentar alcance e atrair novo público", "100k visualizações/post"],
                &["Behind the Scenes", "Stories + Posts", "2x por semana", "Humanizar a marca e criar conexão com o público", "80% taxa de retenção"],
                &["Lives e Q&A", "Transmissão ao vivo", "1x por semana", "Engajamento direto e fortalecimento da comunidade", "1k espectadores simultâneos"],
            ],
            MultilineColumns::All,
        ),
        TableConfig::new(
            "content-calendar",
            "2.3 Calendário de Postagens",
            &["Dia", "Horário", "Tipo de Conteúdo", "Tema", "Hashtags"],
            &[
                &["Segunda-feira", "10:00", "Carrossel Educativo", "Dicas e Tutoriais", "#DicasDeMarketing #ContentCreator"],
                &["Quarta-feira", "15:00", "Reels Viral", "Tendências do Mercado", "#MarketingDigital #Trending"],
                &["Sexta-feira", "19:00", "Live Semanal", "Cases e Resultados", "#CaseDeMarketing #Resultados"],
                &["Domingo", "20:00", "Stories Reflexivos", "Planejamento Semanal", "#MarketingDeConteudo #Planejamento"],
            ],
            MultilineColumns::All,
        ),
    ])
}

/// Tables of the metrics section.
pub fn default_metrics() -> TableSet {
    let quality = || MultilineColumns::Only(vec!["Qualidade Esperada".to_string()]);
    TableSet::new(vec![
        TableConfig::new(
            "kpi-summary",
            "KPIs Principais",
            &["Indicador", "Meta", "Período", "Status"],
            &[
                &["Visualizações Totais", "800k", "6 meses", "Em progresso"],
                &["Taxa de Engajamento", "15%", "Mensal", "Alcançado"],
                &["Taxa de Crescimento", "30%", "Mensal", "Em análise"],
            ],
            quality(),
        ),
        TableConfig::new(
            "detailed-metrics",
            "Métricas Detalhadas",
            &["Categoria", "Métrica", "Meta Atual", "Frequência", "Prioridade"],
            &[
                &["Alcance", "Visualizações", "800k", "6 meses", "Alta"],
                &["Alcance", "Seguidores", "100k", "6 meses", "Alta"],
            ],
            quality(),
        ),
        TableConfig::new(
            "content-goals",
            "Metas de Conteúdo",
            &["Tipo de Conteúdo", "Meta Mensal", "Meta Semanal", "Qualidade Esperada"],
            &[
                &["Posts no Feed", "30", "7-8", "Alta qualidade visual, conteúdo educativo"],
                &["Stories", "60", "15", "Engajador, informativo, interativo"],
            ],
            quality(),
        ),
    ])
}

/// Tables of the monitoring section.
pub fn default_monitoring() -> TableSet {
    let notes = || {
        MultilineColumns::Only(vec![
            "Observações".to_string(),
            "Próximos Passos".to_string(),
        ])
    };
    TableSet::new(vec![
        TableConfig::new(
            "weekly-activities",
            "Atividades Semanais",
            &["Dia", "Atividade", "Horário", "Observações"],
            &[
                &["Segunda", "Planejamento de conteúdo semanal", "09:00 - 11:00", "Definir temas e formatos para a semana"],
                &["Terça", "Produção de conteúdo", "14:00 - 18:00", "Foco em Reels e carrosséis"],
                &["Quinta", "Edição e programação", "10:00 - 15:00", "Finalização dos conteúdos da semana"],
                &["Sexta", "Análise de métricas e ajustes", "13:00 - 15:00", "Avaliação de performance e otimizações"],
            ],
            notes(),
        ),
        TableConfig::new(
            "monthly-goals",
            "Metas Mensais",
            &["Meta", "Objetivo", "Prazo", "Progresso"],
            &[
                &["Visualizações totais", "150k", "30 dias", "Em andamento"],
                &["Novos seguidores", "20k", "30 dias", "Em andamento"],
                &["Taxa de engajamento", "15%", "30 dias", "Em andamento"],
                &["Conteúdos virais", "3 posts", "30 dias", "Em andamento"],
            ],
            notes(),
        ),
        TableConfig::new(
            "content-tracking",
            "Acompanhamento de Conteúdo",
            &["Tipo", "Quantidade Planejada", "Realizados", "Performance Média"],
            &[
                &["Reels", "12 por mês", "8", "50k views"],
                &["Carrosséis", "8 por mês", "5", "10k salvos"],
                &["Stories", "60 por mês", "45", "80% visualização"],
                &["Posts Estáticos", "4 por mês", "3", "5k curtidas"],
            ],
            notes(),
        ),
        TableConfig::new(
            "learning-progress",
            "Progresso de Aprendizado",
            &["Ferramenta", "Nível Atual", "Meta", "Próximos Passos"],
            &[
                &["CANVA PRO", "Intermediário", "Avançado", "Dominar animações e templates personalizados"],
                &["CAPCUT", "Básico", "Avançado", "Aprender efeitos especiais e transições"],
                &["NINJALITICS", "Iniciante", "Intermediário", "Análise avançada de métricas e relatórios"],
            ],
            notes(),
        ),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
