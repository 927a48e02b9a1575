//! Compiled-in texts of a fresh plan.

/// Text given to a newly added custom section.
pub const PLACEHOLDER_CONTENT: &str = "Digite o conteúdo aqui...";

pub const DEFAULT_OVERVIEW: &str = "Este Plano de Desenvolvimento Individual (PDI) foi elaborado com o objetivo de impulsionar minha carreira como Profissional de Publicidade e Propaganda, com foco específico na produção de conteúdo digital de alta performance. O plano visa desenvolver competências essenciais em criação, edição e análise de conteúdo para mídias sociais, combinando habilidades técnicas e estratégicas. A meta principal é estabelecer uma presença digital influente e autêntica, alcançando mais de 800 mil visualizações através de conteúdo estrategicamente planejado e executado com excelência. Este PDI representa um compromisso com a excelência profissional e o desenvolvimento contínuo no dinâmico mercado de marketing digital.";

pub const DEFAULT_MAIN_OBJECTIVE: &str = "Consolidar-me como referência em produção de conteúdo digital através do desenvolvimento de habilidades avançadas em criação, edição e estratégia de conteúdo. O objetivo é construir uma presença digital sólida e influente, atingindo a marca de 800 mil visualizações em 6 meses, através da criação de conteúdo estratégico, educativo e altamente engajador. Este objetivo será alcançado por meio do domínio de ferramentas essenciais como CANVA PRO, CAPCUT e NINJALITICS, além do aperfeiçoamento em copywriting e análise de dados para otimização contínua do conteúdo.";
