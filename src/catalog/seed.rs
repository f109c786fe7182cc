//! Built-in sample data loaded into an empty database

use super::models::Checklist::{self, Additional, Primary};
use super::models::ClaimType::{self, Accidents, Damages, Exclusions, Theft};

pub(crate) struct ClientSeed {
    pub name: &'static str,
    pub procedures: &'static [&'static str],
}

pub(crate) struct ProviderSeed {
    pub name: &'static str,
    pub image: &'static str,
    pub procedures: &'static [(Checklist, ClaimType, &'static [&'static str])],
}

pub(crate) const CLIENTS: &[ClientSeed] = &[
    ClientSeed {
        name: "Cliente A",
        procedures: &[
            "Contato inicial",
            "Análise de requisitos",
            "Proposta",
            "Negociação",
            "Fechamento",
        ],
    },
    ClientSeed {
        name: "Cliente B",
        procedures: &["Reunião de briefing", "Desenvolvimento", "Testes", "Entrega"],
    },
    ClientSeed {
        name: "Cliente C",
        procedures: &["Avaliação", "Planejamento", "Execução", "Acompanhamento"],
    },
];

pub(crate) const PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        name: "Prestador X",
        image: "",
        procedures: &[
            (
                Primary,
                Accidents,
                &["Avaliação de danos", "Contato com cliente", "Relatório de acidente"],
            ),
            (
                Primary,
                Damages,
                &["Inspeção visual", "Fotografia de avarias", "Orçamento de reparo"],
            ),
            (
                Primary,
                Theft,
                &["Verificação de documentos", "Contato com polícia", "Bloqueio de bens"],
            ),
            (
                Primary,
                Exclusions,
                &["Análise contratual", "Consulta jurídica", "Decisão de cobertura"],
            ),
            (Additional, Accidents, &["Revisão", "Aprovação"]),
        ],
    },
    ProviderSeed {
        name: "Prestador Y",
        image: "",
        procedures: &[
            (
                Primary,
                Accidents,
                &[
                    "Registro do sinistro",
                    "Avaliação médica",
                    "Processamento de indenização",
                ],
            ),
            (
                Primary,
                Damages,
                &[
                    "Avaliação técnica",
                    "Negociação com oficinas",
                    "Acompanhamento de reparos",
                ],
            ),
            (
                Primary,
                Theft,
                &[
                    "Investigação preliminar",
                    "Verificação de seguros",
                    "Liberação de valores",
                ],
            ),
            (
                Primary,
                Exclusions,
                &["Revisão de cláusulas", "Parecer técnico", "Comunicação ao cliente"],
            ),
            (Additional, Accidents, &["Treinamento", "Manutenção"]),
        ],
    },
    ProviderSeed {
        name: "Prestador Z",
        image: "",
        procedures: &[
            (
                Primary,
                Accidents,
                &[
                    "Análise de responsabilidade",
                    "Cálculo de prejuízos",
                    "Pagamento de indenização",
                ],
            ),
            (
                Primary,
                Damages,
                &[
                    "Perícia especializada",
                    "Definição de reparos",
                    "Controle de qualidade",
                ],
            ),
            (
                Primary,
                Theft,
                &[
                    "Análise de risco",
                    "Recuperação de bens",
                    "Compensação financeira",
                ],
            ),
            (
                Primary,
                Exclusions,
                &["Auditoria contratual", "Decisão final", "Arquivamento do caso"],
            ),
            (Additional, Accidents, &["Suporte pós-venda", "Atualizações"]),
        ],
    },
];

pub(crate) const REFERENCE_PROCEDURES: &[(ClaimType, &[&str])] = &[
    (
        Accidents,
        &[
            "Notificar imediatamente",
            "Documentar o acidente",
            "Contato com autoridades",
        ],
    ),
    (
        Damages,
        &["Avaliar danos", "Fotografar avarias", "Solicitar orçamento"],
    ),
    (
        Theft,
        &[
            "Registrar boletim de ocorrência",
            "Bloquear cartões/bens",
            "Notificar seguradora",
        ],
    ),
    (
        Exclusions,
        &[
            "Verificar cláusulas contratuais",
            "Consultar especialista",
            "Documentar decisão",
        ],
    ),
];
