table! {
    agendamentos (id) {
        id -> Unsigned<Bigint>,
        codigo_confirmacao -> Varchar,
        protocolo -> Nullable<Varchar>,
        usuario_id -> Nullable<Unsigned<Bigint>>,
        cliente_nome -> Varchar,
        cliente_cpf -> Nullable<Char>,
        cliente_telefone -> Varchar,
        cliente_email -> Varchar,
        oficina_id -> Unsigned<Bigint>,
        oficina_nome -> Varchar,
        oficina_endereco -> Varchar,
        oficina_telefone -> Varchar,
        veiculo -> Varchar,
        servicos -> Varchar,
        total_servico -> Double,
        data_hora -> Datetime,
        status -> Varchar,
        motivo_cancelamento -> Nullable<Text>,
        data_cancelamento -> Nullable<Datetime>,
        divergencia -> Nullable<Text>,
        data_divergencia -> Nullable<Datetime>,
        data_conclusao -> Nullable<Datetime>,
        criado_em -> Datetime,
    }
}

table! {
    marcas (id) {
        id -> Unsigned<Bigint>,
        nome -> Varchar,
    }
}

table! {
    modelo_anos (id) {
        id -> Unsigned<Bigint>,
        modelo_id -> Unsigned<Bigint>,
        ano -> Integer,
    }
}

table! {
    modelos (id) {
        id -> Unsigned<Bigint>,
        marca_id -> Unsigned<Bigint>,
        nome -> Varchar,
    }
}

table! {
    oficinas (id) {
        id -> Unsigned<Bigint>,
        nome -> Varchar,
        endereco -> Varchar,
        cidade -> Varchar,
        estado -> Char,
        cep -> Varchar,
        telefone -> Varchar,
        horario_abertura -> Varchar,
        horario_fechamento -> Varchar,
        dias_funcionamento -> Varchar,
        latitude -> Nullable<Varchar>,
        longitude -> Nullable<Varchar>,
    }
}

table! {
    produtos (id) {
        id -> Unsigned<Bigint>,
        nome -> Varchar,
        tipo -> Varchar,
        viscosidade -> Nullable<Varchar>,
        marca -> Nullable<Varchar>,
        preco -> Double,
    }
}

table! {
    recomendacoes (id) {
        id -> Unsigned<Bigint>,
        modelo_ano_id -> Unsigned<Bigint>,
        oleo_id -> Nullable<Unsigned<Bigint>>,
        filtro_id -> Nullable<Unsigned<Bigint>>,
    }
}

table! {
    user_logins (token) {
        token -> Char,
        user_id -> Unsigned<Bigint>,
        login_time -> Datetime,
    }
}

table! {
    users (id) {
        id -> Unsigned<Bigint>,
        nome -> Varchar,
        email -> Varchar,
        senha_hash -> Char,
        papel -> Varchar,
        oficina_id -> Nullable<Unsigned<Bigint>>,
        criado_em -> Datetime,
    }
}

joinable!(modelo_anos -> modelos (modelo_id));
joinable!(modelos -> marcas (marca_id));
joinable!(user_logins -> users (user_id));

allow_tables_to_appear_in_same_query!(
    agendamentos,
    marcas,
    modelo_anos,
    modelos,
    oficinas,
    produtos,
    recomendacoes,
    user_logins,
    users,
);
